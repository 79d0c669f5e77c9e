//! Alpha-Beta search
//!
//! This module implements the core search algorithm for the Othello AI:
//! depth-limited negamax with alpha-beta pruning over the rules engine and
//! an [`Evaluator`].
//!
//! # Features
//!
//! - Fixed depth per call (the difficulty decides it)
//! - Optional static move ordering to tighten pruning
//! - A node with no legal move is a leaf; search does not simulate passes
//! - Cooperative cancellation through a shared stop flag
//!
//! # Example
//!
//! ```
//! use othello::board::{Board, Player};
//! use othello::eval::Evaluator;
//! use othello::rules::legal_moves;
//! use othello::search::{MoveOrdering, Searcher};
//!
//! let board = Board::new();
//! let moves = legal_moves(&board, Player::A);
//! let mut searcher = Searcher::new();
//!
//! let result = searcher.search(&board, Player::A, &moves, 4, Evaluator::Basic, MoveOrdering::Natural);
//! assert!(result.best_move.is_some());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::board::{Board, Player, Pos};
use crate::eval::Evaluator;
use crate::rules::{apply_move, legal_moves};

use super::MoveOrdering;

/// Infinity score for alpha-beta bounds
const INF: i32 = 1_000_000_000;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Static evaluations performed
    pub evaluations: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` only for an empty move list
    pub best_move: Option<Pos>,
    /// Score of the best move from the searching side's point of view
    pub score: i32,
    /// Nominal depth in plies
    pub depth: i8,
    /// Total nodes searched
    pub nodes: u64,
    /// False if the stop flag cut the search short
    pub completed: bool,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Depth-limited alpha-beta searcher.
///
/// Holds no position state; one searcher can run any number of searches.
/// The stop flag may be shared with another thread to abort a running search.
pub struct Searcher {
    stop: Arc<AtomicBool>,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_stop_flag(Arc::new(AtomicBool::new(false)))
    }

    /// Searcher that aborts as soon as `stop` is raised.
    #[must_use]
    pub fn with_stop_flag(stop: Arc<AtomicBool>) -> Self {
        Self {
            stop,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Handle that can be used to stop this searcher from another thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Pick the best of `moves` for `color` looking `depth` plies ahead.
    ///
    /// `moves` must be the legal moves of `color` on `board`. Ties keep the
    /// first move that reached the best score. Depth below 1 is treated as 1.
    #[must_use]
    pub fn search(
        &mut self,
        board: &Board,
        color: Player,
        moves: &[Pos],
        depth: i8,
        evaluator: Evaluator,
        ordering: MoveOrdering,
    ) -> SearchResult {
        self.nodes = 0;
        self.stats = SearchStats::default();

        let depth = depth.max(1);
        let mut root_moves = moves.to_vec();
        ordering.apply(&mut root_moves);

        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;
        let beta = INF;

        for mov in root_moves {
            if self.is_stopped() {
                break;
            }
            let child = apply_move(board, mov, color);
            let score = -self.alpha_beta(&child, color.opponent(), depth - 1, -beta, -alpha, evaluator, ordering);

            if self.is_stopped() {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
        }

        // A stopped search still reports the first move so callers always get a legal reply
        if best_move.is_none() {
            best_move = moves.first().copied();
            best_score = 0;
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
            completed: !self.is_stopped(),
            stats: self.stats.clone(),
        }
    }

    /// Negamax with alpha-beta pruning. Score is from `color`'s point of view.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &Board,
        color: Player,
        depth: i8,
        mut alpha: i32,
        beta: i32,
        evaluator: Evaluator,
        ordering: MoveOrdering,
    ) -> i32 {
        self.nodes += 1;
        if self.is_stopped() {
            return 0;
        }

        if depth <= 0 {
            self.stats.evaluations += 1;
            return evaluator.evaluate(board, color);
        }

        let mut moves = legal_moves(board, color);
        if moves.is_empty() {
            self.stats.evaluations += 1;
            return evaluator.evaluate(board, color);
        }
        ordering.apply(&mut moves);

        let mut best = -INF;
        for (i, mov) in moves.iter().enumerate() {
            let child = apply_move(board, *mov, color);
            let score = -self.alpha_beta(&child, color.opponent(), depth - 1, -beta, -alpha, evaluator, ordering);

            // Child returned a placeholder score; unwind without using it
            if self.is_stopped() {
                return 0;
            }

            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }
        best
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain negamax without pruning. Reference for checking the pruned search.
#[must_use]
pub fn minimax(board: &Board, color: Player, depth: i8, evaluator: Evaluator) -> i32 {
    if depth <= 0 {
        return evaluator.evaluate(board, color);
    }
    let moves = legal_moves(board, color);
    if moves.is_empty() {
        return evaluator.evaluate(board, color);
    }
    moves
        .iter()
        .map(|&mov| -minimax(&apply_move(board, mov, color), color.opponent(), depth - 1, evaluator))
        .max()
        .unwrap_or(-INF)
}

/// Root of the unpruned search: best move (first on ties) and its score.
#[must_use]
pub fn minimax_best(
    board: &Board,
    color: Player,
    moves: &[Pos],
    depth: i8,
    evaluator: Evaluator,
    ordering: MoveOrdering,
) -> Option<(Pos, i32)> {
    let mut root_moves = moves.to_vec();
    ordering.apply(&mut root_moves);

    let mut best: Option<(Pos, i32)> = None;
    for mov in root_moves {
        let child = apply_move(board, mov, color);
        let score = -minimax(&child, color.opponent(), depth.max(1) - 1, evaluator);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mov, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_search_opening() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let mut searcher = Searcher::new();

        let result = searcher.search(&board, Player::A, &moves, 4, Evaluator::Basic, MoveOrdering::Natural);
        assert!(result.best_move.is_some());
        assert!(moves.contains(&result.best_move.unwrap()));
        assert!(result.completed);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_search_empty_move_list() {
        let board = Board::new();
        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Player::A, &[], 4, Evaluator::Basic, MoveOrdering::Natural);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_search_takes_corner() {
        // A can take (0,0) by flanking (1,1)
        let mut board = Board::new();
        board.set(Pos::new(1, 1), Cell::B);
        board.set(Pos::new(2, 2), Cell::A);
        let moves = legal_moves(&board, Player::A);
        assert!(moves.contains(&Pos::new(0, 0)));

        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Player::A, &moves, 1, Evaluator::Basic, MoveOrdering::Natural);
        assert_eq!(result.best_move, Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_pruning_matches_minimax() {
        let board = apply_move(&Board::new(), Pos::new(2, 3), Player::A);
        let moves = legal_moves(&board, Player::B);

        for depth in 1..=4 {
            for (evaluator, ordering) in [
                (Evaluator::Basic, MoveOrdering::Natural),
                (Evaluator::Advanced, MoveOrdering::EdgesFirst),
            ] {
                let mut searcher = Searcher::new();
                let result = searcher.search(&board, Player::B, &moves, depth, evaluator, ordering);
                let (mov, score) = minimax_best(&board, Player::B, &moves, depth, evaluator, ordering).unwrap();
                assert_eq!(result.best_move, Some(mov), "depth {depth}");
                assert_eq!(result.score, score, "depth {depth}");
            }
        }
    }

    #[test]
    fn test_pruning_cuts_nodes() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Player::A, &moves, 5, Evaluator::Basic, MoveOrdering::Natural);
        assert!(result.stats.beta_cutoffs > 0);
    }

    #[test]
    fn test_no_move_node_is_leaf() {
        // After A takes (0,2), B has no reply: the child is evaluated directly
        let mut board = Board::empty();
        board.set(Pos::new(0, 0), Cell::A);
        board.set(Pos::new(0, 1), Cell::B);
        let moves = legal_moves(&board, Player::A);
        assert_eq!(moves, vec![Pos::new(0, 2)]);

        let mut searcher = Searcher::new();
        let result = searcher.search(&board, Player::A, &moves, 6, Evaluator::Basic, MoveOrdering::Natural);
        let after = apply_move(&board, Pos::new(0, 2), Player::A);
        assert_eq!(result.score, Evaluator::Basic.evaluate(&after, Player::A));
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_stopped_search_still_returns_move() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let mut searcher = Searcher::new();
        searcher.stop_handle().store(true, Ordering::Relaxed);

        let result = searcher.search(&board, Player::A, &moves, 6, Evaluator::Advanced, MoveOrdering::EdgesFirst);
        assert!(!result.completed);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_prestopped_alpha_beta_visits_one_node() {
        let mut searcher = Searcher::new();
        searcher.stop_handle().store(true, Ordering::Relaxed);

        let score = searcher.alpha_beta(
            &Board::new(),
            Player::A,
            6,
            -INF,
            INF,
            Evaluator::Advanced,
            MoveOrdering::EdgesFirst,
        );
        assert_eq!(score, 0);
        assert_eq!(searcher.nodes, 1);
    }

    #[test]
    fn test_stop_raised_mid_search_unwinds() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let mut searcher = Searcher::new();
        let stop = searcher.stop_handle();

        let worker = std::thread::spawn(move || {
            searcher.search(&board, Player::A, &moves, 14, Evaluator::Advanced, MoveOrdering::EdgesFirst)
        });
        std::thread::sleep(std::time::Duration::from_millis(20));
        stop.store(true, Ordering::Relaxed);

        let result = worker.join().unwrap();
        assert!(!result.completed);
        assert!(result.best_move.is_some());
    }
}
