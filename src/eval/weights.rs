//! Evaluation weights
//!
//! Positional weights favor corners and punish the cells that hand a corner
//! to the opponent (X- and C-squares).

use crate::board::{Pos, BOARD_SIZE};

/// Per-cell weight, row-major. Symmetric across both axes.
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Term multipliers for the advanced evaluator
pub struct Weight;

impl Weight {
    /// Per legal move of difference
    pub const MOBILITY: i32 = 10;
    /// Per stability point of difference
    pub const STABILITY: i32 = 5;
    /// Per corner of difference
    pub const CORNER: i32 = 25;
    /// Stability points for holding a corner
    pub const STABLE_CORNER: i32 = 4;
    /// Stability points per edge-line occurrence
    pub const STABLE_EDGE: i32 = 1;
}

/// The four corner cells
pub const CORNERS: [Pos; 4] = [
    Pos { row: 0, col: 0 },
    Pos { row: 0, col: 7 },
    Pos { row: 7, col: 0 },
    Pos { row: 7, col: 7 },
];

#[inline]
pub fn position_weight(pos: Pos) -> i32 {
    POSITION_WEIGHTS[pos.row as usize][pos.col as usize]
}

/// Static move-ordering score: corner 100, other edge 50, interior 10
#[inline]
pub fn ordering_score(pos: Pos) -> i32 {
    if pos.is_corner() {
        100
    } else if pos.is_edge() {
        50
    } else {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_symmetric() {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let w = POSITION_WEIGHTS[r][c];
                assert_eq!(w, POSITION_WEIGHTS[BOARD_SIZE - 1 - r][c]);
                assert_eq!(w, POSITION_WEIGHTS[r][BOARD_SIZE - 1 - c]);
                assert_eq!(w, POSITION_WEIGHTS[c][r]);
            }
        }
    }

    #[test]
    fn test_corner_weights() {
        for corner in CORNERS {
            assert!(corner.is_corner());
            assert_eq!(position_weight(corner), 100);
        }
        assert_eq!(position_weight(Pos::new(1, 1)), -50);
        assert_eq!(position_weight(Pos::new(0, 1)), -20);
    }

    #[test]
    fn test_ordering_score() {
        assert_eq!(ordering_score(Pos::new(7, 0)), 100);
        assert_eq!(ordering_score(Pos::new(0, 4)), 50);
        assert_eq!(ordering_score(Pos::new(6, 7)), 50);
        assert_eq!(ordering_score(Pos::new(3, 3)), 10);
        assert_eq!(ordering_score(Pos::new(1, 1)), 10);
    }
}
