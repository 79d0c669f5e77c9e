//! Flanking captures
//!
//! A disc placed at `pos` captures every contiguous run of opponent discs
//! that is closed on the far side by one of the mover's own discs. Each of
//! the 8 directions is scanned independently; the board edge or an empty
//! cell voids a direction.

use crate::board::{Bitboard, Board, Player, Pos};

/// Direction vectors for flank scanning (8 directions)
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Discs flipped in one direction, or empty if the direction does not qualify.
#[inline]
fn flips_in_direction(board: &Board, pos: Pos, player: Player, dr: i32, dc: i32) -> Bitboard {
    let own = board.discs(player);
    let opp = board.discs(player.opponent());

    let mut run = Bitboard::new();
    let mut cur = pos.offset(dr, dc);
    while let Some(p) = cur {
        if opp.get(p) {
            run.set(p);
            cur = p.offset(dr, dc);
        } else if own.get(p) {
            return run;
        } else {
            break;
        }
    }
    Bitboard::new()
}

/// Discs that would be recolored if `player` moved at `pos`.
///
/// Returns an empty set for an off-board or occupied cell or a non-capturing move.
pub fn flips(board: &Board, pos: Pos, player: Player) -> Bitboard {
    if !pos.is_on_board() || !board.is_empty(pos) {
        return Bitboard::new();
    }
    DIRECTIONS
        .iter()
        .fold(Bitboard::new(), |acc, &(dr, dc)| {
            acc.union(flips_in_direction(board, pos, player, dr, dc))
        })
}

/// Check whether `player` may place a disc at `pos`.
///
/// The cell must be on the board, empty, and at least one direction must
/// flank opponent discs.
#[inline]
pub fn is_legal_move(board: &Board, pos: Pos, player: Player) -> bool {
    if !pos.is_on_board() || !board.is_empty(pos) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| !flips_in_direction(board, pos, player, dr, dc).is_empty())
}

/// Place a disc and flip all captured runs.
///
/// The move must be legal; calling this on an illegal move is a caller bug.
#[must_use]
pub fn apply_move(board: &Board, pos: Pos, player: Player) -> Board {
    debug_assert!(
        is_legal_move(board, pos, player),
        "apply_move on illegal move {:?} for {:?}",
        pos,
        player
    );

    let captured = flips(board, pos, player);
    let mut own = board.discs(player).union(captured);
    own.set(pos);
    let opp = Bitboard::from_bits(board.discs(player.opponent()).bits() & !captured.bits());

    match player {
        Player::A => Board { a: own, b: opp },
        Player::B => Board { a: opp, b: own },
    }
}
