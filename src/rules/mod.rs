//! Othello rules
//!
//! This module implements the rule set:
//! - Flanking captures (legality and flips)
//! - Move generation
//! - End-of-game detection
//!
//! Everything here is a pure function of the board and an explicit player.

pub mod capture;
pub mod mobility;

// Re-exports for convenient access
pub use capture::{apply_move, flips, is_legal_move, DIRECTIONS};
pub use mobility::{has_legal_move, is_game_over, legal_moves, mobility};
