//! Networking Integration Tests
//!
//! Drives an online session with server frames decoded from JSON, the way
//! the client receives them, and checks what it sends back.

use othello::net::socketio::{self, Packet};
use othello::net::{ClientMessage, OnlineSession, Phase, ServerMessage, WireGameState};
use othello::{GameState, Player, Pos, Status};
use serde_json::json;

fn frame(value: serde_json::Value) -> ServerMessage {
    serde_json::from_value(value).expect("valid frame")
}

fn state_frame(event: &str, state: &GameState) -> ServerMessage {
    let data = serde_json::to_value(WireGameState::from_state(state)).unwrap();
    frame(json!({"event": event, "data": data}))
}

#[test]
fn test_host_plays_a_move() {
    let mut session = OnlineSession::new("alice");
    session.enter_lobby();

    session.apply(frame(json!({
        "event": "room-list",
        "data": {"rooms": []}
    })));
    assert!(session.rooms.is_empty());

    session.create_room();
    let sent: Vec<String> = session
        .take_outgoing()
        .iter()
        .map(|m| serde_json::to_string(m).unwrap())
        .collect();
    assert_eq!(sent, vec![r#"{"event":"create-room","data":{"playerName":"alice"}}"#]);

    session.apply(frame(json!({
        "event": "room-created",
        "data": {"roomId": "r-42", "player": {"id": "s1", "name": "alice"}}
    })));
    assert_eq!(session.phase, Phase::Waiting);

    session.apply(frame(json!({
        "event": "player-joined",
        "data": {"players": [{"id": "s1", "name": "alice"}, {"id": "s2", "name": "bob"}], "gameStarted": true}
    })));
    assert_eq!(session.phase, Phase::Playing);

    session.apply(state_frame("game-state-update", &GameState::new()));
    assert!(session.is_my_turn());

    session.request_move(Pos::new(3, 2)).unwrap();
    assert_eq!(session.take_outgoing(), vec![ClientMessage::make_move(Pos::new(3, 2))]);
    // Still the server's last word until it answers
    assert_eq!(session.game, Some(GameState::new()));

    let mut after = GameState::new();
    after.submit_move(Pos::new(3, 2));
    session.apply(state_frame("game-state-update", &after));
    assert_eq!(session.game.map(|g| g.board), Some(after.board));
    assert!(!session.is_my_turn());
    assert!(session.request_move(Pos::new(2, 2)).is_err());
}

#[test]
fn test_guest_joins_running_game() {
    let mut session = OnlineSession::new("bob");
    session.enter_lobby();
    session.join_room("r-42");
    assert_eq!(
        session.take_outgoing(),
        vec![ClientMessage::JoinRoom {
            room_id: "r-42".into(),
            player_name: "bob".into()
        }]
    );

    let mut running = GameState::new();
    running.submit_move(Pos::new(2, 3));
    let state = serde_json::to_value(WireGameState::from_state(&running)).unwrap();
    session.apply(frame(json!({
        "event": "room-joined",
        "data": {
            "roomId": "r-42",
            "players": [{"id": "s1", "name": "alice"}, {"id": "s2", "name": "bob"}],
            "myPlayerId": "s2",
            "myPlayerNumber": 2,
            "gameStarted": true,
            "gameState": state
        }
    })));

    assert_eq!(session.phase, Phase::Playing);
    assert_eq!(session.my_player, Some(Player::B));
    assert!(session.is_my_turn());
    assert_eq!(session.valid_moves, running.legal_moves());
    assert_eq!(session.opponent().map(|p| p.name.as_str()), Some("alice"));
}

#[test]
fn test_game_over_then_reset() {
    let mut session = OnlineSession::new("alice");
    session.apply(frame(json!({
        "event": "room-created",
        "data": {"roomId": "r-1", "player": {"id": "s1", "name": "alice"}}
    })));

    let mut over = WireGameState::from_state(&GameState::new());
    over.game_over = true;
    over.winner = 1;
    session.apply(ServerMessage::GameStateUpdate(over));
    assert_eq!(
        session.game.map(|g| g.status),
        Some(Status::Terminal { winner: Some(Player::A) })
    );

    session.reset_game();
    assert_eq!(session.take_outgoing(), vec![ClientMessage::ResetGame {}]);

    session.apply(frame(json!({
        "event": "game-reset",
        "data": serde_json::to_value(WireGameState::from_state(&GameState::new())).unwrap()
    })));
    assert_eq!(session.game, Some(GameState::new()));
    assert!(session.is_my_turn());
}

#[test]
fn test_server_error_is_shown_not_applied() {
    let mut session = OnlineSession::new("alice");
    session.apply(state_frame("game-state-update", &GameState::new()));
    let before = session.game;

    session.apply(frame(json!({"event": "error", "data": {"message": "Not your turn"}})));
    assert_eq!(session.error.as_deref(), Some("Not your turn"));
    assert_eq!(session.game, before);

    session.clear_error();
    assert!(session.error.is_none());
}

#[test]
fn test_session_over_socketio_packets() {
    let mut session = OnlineSession::new("bob");
    session.enter_lobby();

    let packet = r#"42["room-list",{"rooms":[{"id":"room-abcdef","host":"alice","players":[{"id":"s1","name":"alice"}]}]}]"#;
    let Ok(Packet::Event { name, data }) = socketio::decode(packet) else {
        panic!("event packet expected");
    };
    session.apply(socketio::event_message(&name, data).unwrap());
    assert_eq!(session.rooms.len(), 1);
    assert_eq!(session.rooms[0].short_id(), "ABCDEF");

    session.join_room("room-abcdef");
    session.leave_room();
    let sent: Vec<String> = session
        .take_outgoing()
        .iter()
        .map(|m| socketio::encode_event(m).unwrap())
        .collect();
    assert_eq!(
        sent,
        vec![
            r#"42["join-room",{"roomId":"room-abcdef","playerName":"bob"}]"#.to_string(),
            r#"42["leave-room"]"#.to_string(),
        ]
    );
}
