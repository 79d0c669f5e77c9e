//! Turn, pass and game-over state machine
//!
//! [`GameState`] is the single owner of the authoritative board in local and
//! computer games. The only ways to change it are [`GameState::submit_move`]
//! and [`GameState::reset`]. A move is applied and the next player's
//! mobility is resolved in one synchronous step, so the state is never seen
//! with a stale `to_move`.
//!
//! # Example
//!
//! ```
//! use othello::{GameState, Outcome, Player, Pos};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.submit_move(Pos::new(2, 3)), Outcome::Applied);
//! assert_eq!(game.to_move, Player::B);
//!
//! // Occupied cell: silently rejected
//! assert_eq!(game.submit_move(Pos::new(2, 3)), Outcome::IllegalMove);
//! ```

use tracing::debug;

use crate::board::{Board, Player, Pos, Scoreboard};
use crate::rules::{apply_move, has_legal_move, is_legal_move, legal_moves};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Normal play
    InProgress,
    /// Still in play; the last transition skipped `by` because it had no move
    Passed { by: Player },
    /// Neither side can move. `None` is a draw.
    Terminal { winner: Option<Player> },
}

/// Result of a move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Move applied, turn handed over (or the game ended)
    Applied,
    /// Cell not legal for the side to move; nothing changed
    IllegalMove,
    /// Game already finished; nothing changed
    GameOver,
    /// Move applied, but the given player had no reply and was skipped
    MoveSkipped(Player),
}

/// Complete game state: board, side to move, status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub to_move: Player,
    pub status: Status,
}

impl GameState {
    /// Opening position, A to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::A,
            status: Status::InProgress,
        }
    }

    /// Adopt an arbitrary position.
    ///
    /// If `to_move` has no legal move the position is resolved the same way
    /// `submit_move` would: a pass to the opponent, or a terminal result.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        if has_legal_move(&board, to_move) {
            return Self {
                board,
                to_move,
                status: Status::InProgress,
            };
        }
        let other = to_move.opponent();
        if has_legal_move(&board, other) {
            Self {
                board,
                to_move: other,
                status: Status::Passed { by: to_move },
            }
        } else {
            Self {
                board,
                to_move,
                status: Status::Terminal {
                    winner: board.scoreboard().leader(),
                },
            }
        }
    }

    /// Back to the opening position
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, Status::Terminal { .. })
    }

    /// Winner once the game is over; `None` while playing or on a draw
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            Status::Terminal { winner } => winner,
            _ => None,
        }
    }

    /// Legal moves for the side to move (empty once terminal)
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.is_terminal() {
            Vec::new()
        } else {
            legal_moves(&self.board, self.to_move)
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.board.scoreboard()
    }

    /// Apply a move for the side to move.
    ///
    /// Illegal cells and moves after the end of the game are rejected
    /// without touching the state.
    pub fn submit_move(&mut self, pos: Pos) -> Outcome {
        if self.is_terminal() {
            return Outcome::GameOver;
        }

        let mover = self.to_move;
        if !is_legal_move(&self.board, pos, mover) {
            return Outcome::IllegalMove;
        }

        let board = apply_move(&self.board, pos, mover);
        let next = mover.opponent();
        self.board = board;

        if has_legal_move(&board, next) {
            self.to_move = next;
            self.status = Status::InProgress;
            return Outcome::Applied;
        }

        if has_legal_move(&board, mover) {
            debug!(skipped = ?next, "no legal move, turn returns to {:?}", mover);
            self.to_move = mover;
            self.status = Status::Passed { by: next };
            return Outcome::MoveSkipped(next);
        }

        let score = board.scoreboard();
        let winner = score.leader();
        debug!(?winner, a = score.count_a, b = score.count_b, "game over");
        self.to_move = next;
        self.status = Status::Terminal { winner };
        Outcome::Applied
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh game in the opening position
pub fn new_game() -> GameState {
    GameState::new()
}

/// Functional form of [`GameState::submit_move`]
pub fn submit_move(state: &GameState, pos: Pos) -> (GameState, Outcome) {
    let mut next = *state;
    let outcome = next.submit_move(pos);
    (next, outcome)
}
