//! Search module for the Othello AI
//!
//! Contains:
//! - Alpha-Beta (negamax) search with cooperative cancellation
//! - Static move ordering
//! - An unpruned reference minimax

pub mod alphabeta;
pub mod ordering;

pub use alphabeta::{minimax, minimax_best, SearchResult, SearchStats, Searcher};
pub use ordering::MoveOrdering;
