//! Online game session
//!
//! The server owns the game. [`OnlineSession`] mirrors what the server last
//! said and queues outgoing frames; it never changes the mirrored board on
//! its own, not even optimistically after sending a move.

use tracing::{debug, warn};

use crate::board::{Player, Pos};
use crate::error::WireError;
use crate::game::GameState;
use crate::rules::is_legal_move;

use super::protocol::{ClientMessage, RoomInfo, ServerMessage, WireGameState, WirePlayer};

pub const NAME_REQUIRED: &str = "Please enter a player name";

/// Where the player is in the online flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Lobby,
    /// In a room, waiting for an opponent
    Waiting,
    Playing,
}

/// Why `request_move` did not send anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    NoGame,
    GameOver,
    NotMyTurn,
    Illegal,
}

/// Client-side view of an online game.
#[derive(Debug, Default)]
pub struct OnlineSession {
    pub phase: Phase,
    pub player_name: String,
    pub room_id: Option<String>,
    pub players: Vec<WirePlayer>,
    pub my_player_id: Option<String>,
    pub my_player: Option<Player>,
    pub rooms: Vec<RoomInfo>,
    /// Last game state the server sent
    pub game: Option<GameState>,
    /// Legal moves as listed by the server
    pub valid_moves: Vec<Pos>,
    pub error: Option<String>,
    outgoing: Vec<ClientMessage>,
}

impl OnlineSession {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            ..Self::default()
        }
    }

    /// Frames queued since the last call, oldest first.
    pub fn take_outgoing(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outgoing)
    }

    /// Connection established: show the lobby.
    pub fn enter_lobby(&mut self) {
        self.phase = Phase::Lobby;
        self.error = None;
    }

    pub fn create_room(&mut self) {
        let Some(name) = self.checked_name() else {
            return;
        };
        self.error = None;
        self.outgoing.push(ClientMessage::CreateRoom { player_name: name });
    }

    pub fn join_room(&mut self, room_id: &str) {
        let Some(name) = self.checked_name() else {
            return;
        };
        self.error = None;
        self.outgoing.push(ClientMessage::JoinRoom {
            room_id: room_id.to_string(),
            player_name: name,
        });
    }

    /// Leave the current room and go back to the lobby.
    pub fn leave_room(&mut self) {
        self.outgoing.push(ClientMessage::LeaveRoom {});
        self.clear_room();
        self.phase = Phase::Lobby;
    }

    pub fn reset_game(&mut self) {
        self.outgoing.push(ClientMessage::ResetGame {});
    }

    /// Send a move if the mirror says it can be played.
    ///
    /// The mirror is left untouched; the server's next update is the only thing that changes it.
    pub fn request_move(&mut self, pos: Pos) -> Result<(), MoveRejection> {
        let game = self.game.as_ref().ok_or(MoveRejection::NoGame)?;
        if game.is_terminal() {
            return Err(MoveRejection::GameOver);
        }
        if self.my_player != Some(game.to_move) {
            return Err(MoveRejection::NotMyTurn);
        }
        if !is_legal_move(&game.board, pos, game.to_move) {
            return Err(MoveRejection::Illegal);
        }
        self.outgoing.push(ClientMessage::make_move(pos));
        Ok(())
    }

    /// Back to the start screen, forgetting everything but the name.
    pub fn go_to_menu(&mut self) {
        let name = std::mem::take(&mut self.player_name);
        *self = Self::new(name);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_my_turn(&self) -> bool {
        match (&self.game, self.my_player) {
            (Some(game), Some(me)) => !game.is_terminal() && game.to_move == me,
            _ => false,
        }
    }

    pub fn me(&self) -> Option<&WirePlayer> {
        let id = self.my_player_id.as_ref()?;
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn opponent(&self) -> Option<&WirePlayer> {
        let id = self.my_player_id.as_ref()?;
        self.players.iter().find(|p| &p.id != id)
    }

    /// Connection lost: back to the menu with a message.
    pub fn on_disconnect(&mut self, reason: Option<String>) {
        self.go_to_menu();
        self.error = Some(match reason {
            Some(reason) => format!("Disconnected: {reason}"),
            None => "Disconnected from server".to_string(),
        });
    }

    /// Apply a server frame. The server's word replaces whatever is mirrored.
    pub fn apply(&mut self, msg: ServerMessage) {
        debug!(event = msg.event(), "apply server message");
        if let Err(err) = self.apply_inner(msg) {
            warn!(%err, "rejected server state");
            self.error = Some(format!("Invalid data from server: {err}"));
        }
    }

    fn apply_inner(&mut self, msg: ServerMessage) -> Result<(), WireError> {
        match msg {
            ServerMessage::RoomCreated { room_id, player } => {
                self.room_id = Some(room_id);
                self.phase = Phase::Waiting;
                self.my_player_id = Some(player.id.clone());
                self.players = vec![player];
                self.my_player = Some(Player::A);
                self.error = None;
            }
            ServerMessage::RoomJoined {
                room_id,
                players,
                my_player_id,
                my_player_number,
                game_started,
                game_state,
            } => {
                let me = Player::from_number(my_player_number).ok_or(WireError::PlayerNumber(my_player_number))?;
                let mirror = game_state.as_ref().map(mirror_of).transpose()?;
                self.room_id = Some(room_id);
                self.phase = if game_started { Phase::Playing } else { Phase::Waiting };
                self.players = players;
                self.my_player_id = Some(my_player_id);
                self.my_player = Some(me);
                match mirror {
                    Some((game, moves)) => {
                        self.game = Some(game);
                        self.valid_moves = moves;
                    }
                    None => {
                        self.game = None;
                        self.valid_moves.clear();
                    }
                }
                self.error = None;
            }
            ServerMessage::PlayerJoined { players, game_started } => {
                self.players = players;
                self.phase = if game_started { Phase::Playing } else { Phase::Waiting };
            }
            ServerMessage::PlayerLeft { players } => {
                self.players = players;
                if self.players.len() < 2 {
                    self.phase = Phase::Waiting;
                }
            }
            ServerMessage::GameStateUpdate(state) => {
                let (game, moves) = mirror_of(&state)?;
                self.game = Some(game);
                self.valid_moves = moves;
                self.phase = Phase::Playing;
            }
            ServerMessage::GameReset(state) => {
                let state = WireGameState {
                    game_over: false,
                    winner: 0,
                    ..state
                };
                let (game, moves) = mirror_of(&state)?;
                self.game = Some(game);
                self.valid_moves = moves;
            }
            ServerMessage::RoomList { rooms } => {
                self.rooms = rooms;
            }
            ServerMessage::Error { message } => {
                self.error = Some(message);
            }
        }
        Ok(())
    }

    fn checked_name(&mut self) -> Option<String> {
        let name = self.player_name.trim();
        if name.is_empty() {
            self.error = Some(NAME_REQUIRED.to_string());
            None
        } else {
            Some(name.to_string())
        }
    }

    fn clear_room(&mut self) {
        self.room_id = None;
        self.players.clear();
        self.my_player_id = None;
        self.my_player = None;
        self.game = None;
        self.valid_moves.clear();
    }
}

fn mirror_of(state: &WireGameState) -> Result<(GameState, Vec<Pos>), WireError> {
    Ok((state.to_game_state()?, state.moves()?))
}
