//! Room server wire protocol
//!
//! Messages are modelled as `{"event", "data"}` objects:
//!
//! ```json
//! {"event":"make-move","data":{"row":2,"col":3}}
//! ```
//!
//! and travel as Socket.IO event packets (`42["make-move",{"row":2,"col":3}]`,
//! see [`socketio`](super::socketio)). Event names are kebab-case, payload fields camelCase. Boards travel as
//! 8 rows of 8 numbers (0 empty, 1 for A, 2 for B) and `winner` 0 means a
//! draw. Nothing correlates a reply with a request, so the server alone
//! decides the order in which moves from the two clients take effect.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Player, Pos, BOARD_SIZE};
use crate::error::WireError;
use crate::game::{GameState, Status};
use crate::rules::legal_moves;

/// Frames sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    CreateRoom { player_name: String },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, player_name: String },
    LeaveRoom {},
    MakeMove { row: u8, col: u8 },
    ResetGame {},
}

impl ClientMessage {
    pub fn make_move(pos: Pos) -> Self {
        ClientMessage::MakeMove {
            row: pos.row,
            col: pos.col,
        }
    }
}

/// Frames received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String, player: WirePlayer },
    #[serde(rename_all = "camelCase")]
    RoomJoined {
        room_id: String,
        players: Vec<WirePlayer>,
        my_player_id: String,
        my_player_number: u8,
        game_started: bool,
        #[serde(default)]
        game_state: Option<WireGameState>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerJoined {
        players: Vec<WirePlayer>,
        game_started: bool,
    },
    PlayerLeft { players: Vec<WirePlayer> },
    GameStateUpdate(WireGameState),
    GameReset(WireGameState),
    RoomList { rooms: Vec<RoomInfo> },
    Error { message: String },
}

impl ServerMessage {
    /// Event name as it appears on the wire, for logging
    pub fn event(&self) -> &'static str {
        match self {
            ServerMessage::RoomCreated { .. } => "room-created",
            ServerMessage::RoomJoined { .. } => "room-joined",
            ServerMessage::PlayerJoined { .. } => "player-joined",
            ServerMessage::PlayerLeft { .. } => "player-left",
            ServerMessage::GameStateUpdate(_) => "game-state-update",
            ServerMessage::GameReset(_) => "game-reset",
            ServerMessage::RoomList { .. } => "room-list",
            ServerMessage::Error { .. } => "error",
        }
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePlayer {
    pub id: String,
    pub name: String,
}

/// Lobby listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: String,
    /// Name of the player who created the room
    pub host: String,
    pub players: Vec<WirePlayer>,
}

impl RoomInfo {
    pub fn is_full(&self) -> bool {
        self.players.len() >= 2
    }

    /// Last six characters of the id, upper-cased
    pub fn short_id(&self) -> String {
        let start = self.id.char_indices().rev().nth(5).map_or(0, |(i, _)| i);
        self.id[start..].to_uppercase()
    }
}

/// Game snapshot as the server sends it.
///
/// `game-reset` frames carry no `gameOver`/`winner`; they default to a live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGameState {
    pub board: Vec<Vec<u8>>,
    pub current_player: u8,
    #[serde(default)]
    pub valid_moves: Vec<[u8; 2]>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: u8,
}

impl WireGameState {
    /// Snapshot of a local game, with the side to move's legal moves.
    pub fn from_state(state: &GameState) -> Self {
        let board = state
            .board
            .to_cells()
            .iter()
            .map(|row| row.iter().map(|&cell| cell_number(cell)).collect())
            .collect();
        let valid_moves = if state.is_terminal() {
            Vec::new()
        } else {
            legal_moves(&state.board, state.to_move)
                .into_iter()
                .map(|p| [p.row, p.col])
                .collect()
        };
        Self {
            board,
            current_player: state.to_move.number(),
            valid_moves,
            game_over: state.is_terminal(),
            winner: state.winner().map_or(0, Player::number),
        }
    }

    pub fn to_board(&self) -> Result<Board, WireError> {
        if self.board.len() != BOARD_SIZE {
            return Err(WireError::BoardRows(self.board.len()));
        }
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, values) in self.board.iter().enumerate() {
            if values.len() != BOARD_SIZE {
                return Err(WireError::BoardColumns { row, len: values.len() });
            }
            for (col, &value) in values.iter().enumerate() {
                cells[row][col] = match value {
                    0 => Cell::Empty,
                    1 => Cell::A,
                    2 => Cell::B,
                    _ => return Err(WireError::CellValue { row, col, value }),
                };
            }
        }
        Ok(Board::from_cells(&cells))
    }

    pub fn current(&self) -> Result<Player, WireError> {
        Player::from_number(self.current_player).ok_or(WireError::PlayerNumber(self.current_player))
    }

    /// Winner of a finished game; `None` for a draw.
    pub fn winner(&self) -> Result<Option<Player>, WireError> {
        match self.winner {
            0 => Ok(None),
            n => Player::from_number(n).map(Some).ok_or(WireError::PlayerNumber(n)),
        }
    }

    pub fn moves(&self) -> Result<Vec<Pos>, WireError> {
        self.valid_moves
            .iter()
            .map(|&[row, col]| {
                if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
                    Ok(Pos::new(row, col))
                } else {
                    Err(WireError::MoveOffBoard(row, col))
                }
            })
            .collect()
    }

    /// Mirror of the server's game. The server's status is taken as is.
    pub fn to_game_state(&self) -> Result<GameState, WireError> {
        let status = if self.game_over {
            Status::Terminal { winner: self.winner()? }
        } else {
            Status::InProgress
        };
        Ok(GameState {
            board: self.to_board()?,
            to_move: self.current()?,
            status,
        })
    }
}

fn cell_number(cell: Cell) -> u8 {
    cell.player().map_or(0, Player::number)
}
