//! Move generation and end-of-game detection

use crate::board::{Board, Player, Pos, TOTAL_CELLS};

use super::capture::is_legal_move;

/// All legal moves for `player`, in row-major order.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Pos> {
    (0..TOTAL_CELLS)
        .map(Pos::from_index)
        .filter(|&pos| is_legal_move(board, pos, player))
        .collect()
}

/// Whether `player` has at least one legal move.
#[inline]
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    (0..TOTAL_CELLS)
        .map(Pos::from_index)
        .any(|pos| is_legal_move(board, pos, player))
}

/// Number of legal moves for `player`.
#[inline]
pub fn mobility(board: &Board, player: Player) -> i32 {
    (0..TOTAL_CELLS)
        .map(Pos::from_index)
        .filter(|&pos| is_legal_move(board, pos, player))
        .count() as i32
}

/// Neither side can move.
#[inline]
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Player::A) && !has_legal_move(board, Player::B)
}
