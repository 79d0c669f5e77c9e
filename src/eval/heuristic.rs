//! Heuristic evaluation functions for Othello positions
//!
//! Two evaluators are provided:
//! - **Basic**: positional weight sum
//! - **Advanced**: positional sum plus mobility, edge stability and corner control
//!
//! Both are antisymmetric: `evaluate(board, p) == -evaluate(board, p.opponent())`.
//! Negamax relies on this.

use crate::board::{Board, Player, Pos, BOARD_SIZE};
use crate::rules::mobility;

use super::weights::{position_weight, Weight, CORNERS};

/// Evaluator selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    Basic,
    Advanced,
}

impl Evaluator {
    /// Score `board` from `player`'s point of view. Higher is better for `player`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, board: &Board, player: Player) -> i32 {
        match self {
            Evaluator::Basic => evaluate_basic(board, player),
            Evaluator::Advanced => evaluate_advanced(board, player),
        }
    }
}

/// Positional weight sum: own discs add their cell weight, opponent discs subtract it.
#[must_use]
pub fn evaluate_basic(board: &Board, player: Player) -> i32 {
    let own: i32 = board.discs(player).iter_ones().map(position_weight).sum();
    let opp: i32 = board
        .discs(player.opponent())
        .iter_ones()
        .map(position_weight)
        .sum();
    own - opp
}

/// Positional sum plus mobility, stability and corner terms.
#[must_use]
pub fn evaluate_advanced(board: &Board, player: Player) -> i32 {
    let opponent = player.opponent();

    let position = evaluate_basic(board, player);
    let mobility_score = (mobility(board, player) - mobility(board, opponent)) * Weight::MOBILITY;
    let stability_score = (stability(board, player) - stability(board, opponent)) * Weight::STABILITY;
    let corner_score = (corner_control(board, player) - corner_control(board, opponent)) * Weight::CORNER;

    position + mobility_score + stability_score + corner_score
}

/// Simplified stability proxy.
///
/// Each held corner is worth `STABLE_CORNER`; then every disc on the top row,
/// bottom row, left column and right column is worth `STABLE_EDGE` per line,
/// so a corner disc is counted on both of its lines. Not a true
/// permanent-stability analysis.
#[must_use]
pub fn stability(board: &Board, player: Player) -> i32 {
    let discs = board.discs(player);
    let mut score = CORNERS.iter().filter(|&&c| discs.get(c)).count() as i32 * Weight::STABLE_CORNER;

    let last = BOARD_SIZE as u8 - 1;
    for i in 0..BOARD_SIZE as u8 {
        for pos in [Pos::new(0, i), Pos::new(last, i), Pos::new(i, 0), Pos::new(i, last)] {
            if discs.get(pos) {
                score += Weight::STABLE_EDGE;
            }
        }
    }
    score
}

/// Number of corners held.
#[inline]
#[must_use]
pub fn corner_control(board: &Board, player: Player) -> i32 {
    let discs = board.discs(player);
    CORNERS.iter().filter(|&&c| discs.get(c)).count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::rules::{apply_move, legal_moves};

    #[test]
    fn test_opening_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate_basic(&board, Player::A), 0);
        assert_eq!(evaluate_advanced(&board, Player::A), 0);
    }

    #[test]
    fn test_basic_counts_weights() {
        let mut board = Board::empty();
        board.set(Pos::new(0, 0), Cell::A); // +100
        board.set(Pos::new(1, 1), Cell::A); // -50
        board.set(Pos::new(0, 2), Cell::B); // 10 for B
        assert_eq!(evaluate_basic(&board, Player::A), 100 - 50 - 10);
        assert_eq!(evaluate_basic(&board, Player::B), -(100 - 50 - 10));
    }

    #[test]
    fn test_stability_counts_corner_on_both_lines() {
        let mut board = Board::empty();
        board.set(Pos::new(0, 0), Cell::A);
        // 4 for the corner + 1 for row 0 + 1 for column 0
        assert_eq!(stability(&board, Player::A), 6);

        board.set(Pos::new(0, 3), Cell::A);
        assert_eq!(stability(&board, Player::A), 7);

        board.set(Pos::new(3, 3), Cell::A);
        assert_eq!(stability(&board, Player::A), 7);
        assert_eq!(stability(&board, Player::B), 0);
    }

    #[test]
    fn test_corner_control() {
        let mut board = Board::empty();
        board.set(Pos::new(0, 0), Cell::A);
        board.set(Pos::new(7, 7), Cell::A);
        board.set(Pos::new(0, 7), Cell::B);
        assert_eq!(corner_control(&board, Player::A), 2);
        assert_eq!(corner_control(&board, Player::B), 1);
    }

    #[test]
    fn test_advanced_terms() {
        // A holds a corner; after that the only difference is mobility
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::A);

        let mob = mobility(&board, Player::A) - mobility(&board, Player::B);
        let expected = 100 + mob * 10 + 6 * 5 + 25;
        assert_eq!(evaluate_advanced(&board, Player::A), expected);
    }

    #[test]
    fn test_evaluators_antisymmetric() {
        let mut board = Board::new();
        let mut player = Player::A;
        for _ in 0..10 {
            let moves = legal_moves(&board, player);
            let Some(&mov) = moves.last() else { break };
            board = apply_move(&board, mov, player);
            player = player.opponent();

            for eval in [Evaluator::Basic, Evaluator::Advanced] {
                assert_eq!(
                    eval.evaluate(&board, Player::A),
                    -eval.evaluate(&board, Player::B)
                );
            }
        }
    }
}
