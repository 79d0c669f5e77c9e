//! Othello engine with computer opponents and online play
//!
//! Standard Othello on an 8x8 board:
//! - A move must flank at least one opposing disc in a straight line
//! - Every flanked line in all 8 directions flips at once
//! - A side with no legal move passes; the game ends when neither can move
//! - Most discs wins, equal counts draw
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Move legality, flipping and mobility
//! - [`game`]: Turn, pass and game-over state machine
//! - [`eval`]: Position evaluation and heuristics
//! - [`search`]: Alpha-beta search with move ordering
//! - [`engine`]: Difficulty tiers over the search
//! - [`net`]: Room server protocol, client and online session
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use othello::{best_move, Difficulty, GameState, Outcome};
//!
//! let mut game = GameState::new();
//! let moves = game.legal_moves();
//!
//! let pos = best_move(&game.board, game.to_move, &moves, Difficulty::Medium).unwrap();
//! assert_eq!(game.submit_move(pos), Outcome::Applied);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod net;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{scoreboard, Board, Cell, Player, Pos, Scoreboard, BOARD_SIZE};
pub use config::AppConfig;
pub use engine::{best_move, AIEngine, Difficulty, MoveResult, SearchType};
pub use error::{ConfigError, NetError, WireError};
pub use game::{new_game, submit_move, GameState, Outcome, Status};
pub use rules::{apply_move, is_legal_move, legal_moves};
