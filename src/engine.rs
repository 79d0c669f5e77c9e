//! Computer opponent
//!
//! This module maps a difficulty tier to a move policy:
//!
//! 1. **Easy**: no search. With 30% probability a corner is taken if one is
//!    available, otherwise a uniformly random legal move.
//! 2. **Medium**: 4-ply alpha-beta with the basic positional evaluator.
//! 3. **Hard**: 6-ply alpha-beta with the advanced evaluator and
//!    corner/edge-first move ordering.
//!
//! # Example
//!
//! ```
//! use othello::{AIEngine, Board, Difficulty, Player};
//! use othello::rules::legal_moves;
//!
//! let board = Board::new();
//! let moves = legal_moves(&board, Player::A);
//! let mut engine = AIEngine::with_seed(Difficulty::Medium, 7);
//!
//! let result = engine.get_move_with_stats(&board, Player::A, &moves);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Player, Pos};
use crate::eval::Evaluator;
use crate::rules::legal_moves;
use crate::search::{MoveOrdering, Searcher};

/// Probability that the easy tier looks for a corner before picking at random
const CORNER_CHANCE: f64 = 0.3;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Search depth in plies
    pub fn depth(self) -> i8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn evaluator(self) -> Evaluator {
        match self {
            Difficulty::Easy | Difficulty::Medium => Evaluator::Basic,
            Difficulty::Hard => Evaluator::Advanced,
        }
    }

    pub fn ordering(self) -> MoveOrdering {
        match self {
            Difficulty::Easy | Difficulty::Medium => MoveOrdering::Natural,
            Difficulty::Hard => MoveOrdering::EdgesFirst,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// How the move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Easy tier took a corner
    Corner,
    /// Easy tier picked uniformly at random
    Random,
    /// Alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move, `None` only for an empty move list
    pub best_move: Option<Pos>,
    /// Search score of the chosen move (0 when no search ran)
    pub score: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    /// False if the search was stopped before finishing
    pub completed: bool,
}

impl MoveResult {
    #[inline]
    fn picked(pos: Option<Pos>, search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: 0,
            search_type,
            time_ms,
            nodes: 0,
            completed: true,
        }
    }
}

/// Computer player for one difficulty tier.
///
/// Owns its random source so tests can seed it, and a searcher whose stop
/// flag can be raised from another thread.
pub struct AIEngine {
    difficulty: Difficulty,
    rng: StdRng,
    searcher: Searcher,
}

impl AIEngine {
    /// Engine seeded from the OS
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_os_rng(),
            searcher: Searcher::new(),
        }
    }

    /// Deterministic engine for tests and replays
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
            searcher: Searcher::new(),
        }
    }

    /// Engine whose search aborts when `stop` is raised
    #[must_use]
    pub fn with_stop_flag(difficulty: Difficulty, stop: Arc<AtomicBool>) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_os_rng(),
            searcher: Searcher::with_stop_flag(stop),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Best move for `player` given its legal `moves`.
    ///
    /// Returns `None` only when `moves` is empty, which callers should never ask for.
    pub fn best_move(&mut self, board: &Board, player: Player, moves: &[Pos]) -> Option<Pos> {
        self.get_move_with_stats(board, player, moves).best_move
    }

    /// Best move for `player`, generating its legal moves first.
    pub fn get_move(&mut self, board: &Board, player: Player) -> Option<Pos> {
        let moves = legal_moves(board, player);
        self.best_move(board, player, &moves)
    }

    /// Best move along with how it was found.
    pub fn get_move_with_stats(&mut self, board: &Board, player: Player, moves: &[Pos]) -> MoveResult {
        let start = Instant::now();

        if moves.is_empty() {
            return MoveResult::picked(None, SearchType::Random, 0);
        }

        let result = match self.difficulty {
            Difficulty::Easy => self.easy_move(moves, start),
            Difficulty::Medium | Difficulty::Hard => {
                let result = self.searcher.search(
                    board,
                    player,
                    moves,
                    self.difficulty.depth(),
                    self.difficulty.evaluator(),
                    self.difficulty.ordering(),
                );
                MoveResult {
                    best_move: result.best_move,
                    score: result.score,
                    search_type: SearchType::AlphaBeta,
                    time_ms: start.elapsed().as_millis() as u64,
                    nodes: result.nodes,
                    completed: result.completed,
                }
            }
        };

        debug!(
            difficulty = self.difficulty.name(),
            ?player,
            best = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "ai move"
        );
        result
    }

    /// Corner with probability `CORNER_CHANCE` when one exists, otherwise uniform.
    fn easy_move(&mut self, moves: &[Pos], start: Instant) -> MoveResult {
        if self.rng.random_bool(CORNER_CHANCE) {
            let corners: Vec<Pos> = moves.iter().copied().filter(|p| p.is_corner()).collect();
            if !corners.is_empty() {
                let pick = corners[self.rng.random_range(0..corners.len())];
                return MoveResult::picked(Some(pick), SearchType::Corner, start.elapsed().as_millis() as u64);
            }
        }
        let pick = moves[self.rng.random_range(0..moves.len())];
        MoveResult::picked(Some(pick), SearchType::Random, start.elapsed().as_millis() as u64)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

/// One-shot convenience: best move for `player` at `difficulty`.
pub fn best_move(board: &Board, player: Player, moves: &[Pos], difficulty: Difficulty) -> Option<Pos> {
    AIEngine::new(difficulty).best_move(board, player, moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::search::minimax_best;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_difficulty_table() {
        assert_eq!(Difficulty::Easy.depth(), 2);
        assert_eq!(Difficulty::Medium.depth(), 4);
        assert_eq!(Difficulty::Hard.depth(), 6);
        assert_eq!(Difficulty::Medium.evaluator(), Evaluator::Basic);
        assert_eq!(Difficulty::Hard.evaluator(), Evaluator::Advanced);
        assert_eq!(Difficulty::Hard.ordering(), MoveOrdering::EdgesFirst);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_empty_moves_returns_none() {
        let mut engine = AIEngine::with_seed(Difficulty::Hard, 1);
        assert_eq!(engine.best_move(&Board::new(), Player::A, &[]), None);
    }

    #[test]
    fn test_every_tier_returns_legal_move() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        for difficulty in Difficulty::ALL {
            let mut engine = AIEngine::with_seed(difficulty, 42);
            let mov = engine.best_move(&board, Player::A, &moves).unwrap();
            assert!(moves.contains(&mov), "{difficulty:?} picked {mov:?}");
        }
    }

    #[test]
    fn test_medium_matches_reference_search() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let mut engine = AIEngine::with_seed(Difficulty::Medium, 0);
        let result = engine.get_move_with_stats(&board, Player::A, &moves);
        let (mov, score) = minimax_best(&board, Player::A, &moves, 4, Evaluator::Basic, MoveOrdering::Natural).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.best_move, Some(mov));
        assert_eq!(result.score, score);
    }

    #[test]
    fn test_easy_prefers_corners() {
        // A can take (0,0) or play one of the four interior opening moves
        let mut board = Board::new();
        board.set(Pos::new(1, 1), Cell::B);
        board.set(Pos::new(2, 2), Cell::A);
        let moves = legal_moves(&board, Player::A);
        let corner = Pos::new(0, 0);
        assert!(moves.contains(&corner));

        let mut engine = AIEngine::with_seed(Difficulty::Easy, 2024);
        let trials = 2000;
        let hits = (0..trials)
            .filter(|_| engine.best_move(&board, Player::A, &moves) == Some(corner))
            .count();

        let uniform = trials / moves.len();
        assert!(hits > uniform + trials / 10, "corner picked {hits} of {trials}");
    }

    #[test]
    fn test_easy_without_corners_is_random() {
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let mut engine = AIEngine::with_seed(Difficulty::Easy, 5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let result = engine.get_move_with_stats(&board, Player::A, &moves);
            assert_eq!(result.search_type, SearchType::Random);
            seen.insert(result.best_move.unwrap());
        }
        assert_eq!(seen.len(), moves.len());
    }

    #[test]
    fn test_stop_flag_marks_incomplete() {
        let stop = Arc::new(AtomicBool::new(true));
        let mut engine = AIEngine::with_stop_flag(Difficulty::Hard, Arc::clone(&stop));
        let board = Board::new();
        let moves = legal_moves(&board, Player::A);
        let result = engine.get_move_with_stats(&board, Player::A, &moves);
        assert!(!result.completed);
        stop.store(false, Ordering::Relaxed);
        let result = engine.get_move_with_stats(&board, Player::A, &moves);
        assert!(result.completed);
    }

    #[test]
    fn test_difficulty_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            difficulty: Difficulty,
        }
        let w: Wrapper = toml::from_str("difficulty = \"hard\"").unwrap();
        assert_eq!(w.difficulty, Difficulty::Hard);
    }
}
