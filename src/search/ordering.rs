//! Move ordering for alpha-beta
//!
//! Trying corners and edges first tends to raise alpha early and prune more.

use std::cmp::Reverse;

use crate::board::Pos;
use crate::eval::ordering_score;

/// Order in which moves are tried at each node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrdering {
    /// Row-major, as produced by `legal_moves`
    Natural,
    /// Stable sort by descending static score: corner, edge, interior
    EdgesFirst,
}

impl MoveOrdering {
    #[inline]
    pub fn apply(self, moves: &mut [Pos]) {
        match self {
            MoveOrdering::Natural => {}
            MoveOrdering::EdgesFirst => moves.sort_by_key(|&pos| Reverse(ordering_score(pos))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_keeps_order() {
        let mut moves = vec![Pos::new(3, 3), Pos::new(0, 0), Pos::new(0, 3)];
        MoveOrdering::Natural.apply(&mut moves);
        assert_eq!(moves, vec![Pos::new(3, 3), Pos::new(0, 0), Pos::new(0, 3)]);
    }

    #[test]
    fn test_edges_first_is_stable() {
        let mut moves = vec![
            Pos::new(2, 2),
            Pos::new(0, 3),
            Pos::new(2, 5),
            Pos::new(7, 7),
            Pos::new(5, 0),
            Pos::new(0, 0),
        ];
        MoveOrdering::EdgesFirst.apply(&mut moves);
        assert_eq!(
            moves,
            vec![
                Pos::new(7, 7),
                Pos::new(0, 0),
                Pos::new(0, 3),
                Pos::new(5, 0),
                Pos::new(2, 2),
                Pos::new(2, 5),
            ]
        );
    }
}
