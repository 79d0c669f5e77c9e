//! Evaluation module for Othello positions
//!
//! The evaluation considers:
//! - Positional weights (corners good, corner-adjacent cells bad)
//! - Mobility
//! - Edge stability (simplified)
//! - Corner control

pub mod heuristic;
pub mod weights;

pub use heuristic::{corner_control, evaluate_advanced, evaluate_basic, stability, Evaluator};
pub use weights::{ordering_score, position_weight, Weight, CORNERS, POSITION_WEIGHTS};
