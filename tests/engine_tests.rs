//! Search and Engine Integration Tests
//!
//! - Alpha-beta agrees with plain minimax on random midgame positions
//! - Evaluators are antisymmetric
//! - Easy tier favours corners
//! - Hard tier picks legal moves under its own ordering

use othello::eval::{Evaluator, CORNERS};
use othello::search::{minimax_best, MoveOrdering, Searcher};
use othello::{apply_move, legal_moves, AIEngine, Board, Cell, Difficulty, Player, Pos, SearchType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Position after `plies` random moves; `None` if the game ended first
fn random_position(seed: u64, plies: usize) -> Option<(Board, Player)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut player = Player::A;
    for _ in 0..plies {
        let mut moves = legal_moves(&board, player);
        if moves.is_empty() {
            player = player.opponent();
            moves = legal_moves(&board, player);
            if moves.is_empty() {
                return None;
            }
        }
        let pos = moves[rng.random_range(0..moves.len())];
        board = apply_move(&board, pos, player);
        player = player.opponent();
    }
    if legal_moves(&board, player).is_empty() {
        None
    } else {
        Some((board, player))
    }
}

#[test]
fn test_alpha_beta_equals_minimax() {
    let configs = [
        (Evaluator::Basic, MoveOrdering::Natural),
        (Evaluator::Advanced, MoveOrdering::EdgesFirst),
    ];
    let mut checked = 0;
    for seed in 0..12 {
        let Some((board, player)) = random_position(seed, 10 + seed as usize) else {
            continue;
        };
        let moves = legal_moves(&board, player);
        for depth in 1..=3 {
            for (evaluator, ordering) in configs {
                let mut searcher = Searcher::new();
                let result = searcher.search(&board, player, &moves, depth, evaluator, ordering);
                let (best, score) = minimax_best(&board, player, &moves, depth, evaluator, ordering).unwrap();
                assert_eq!(result.score, score, "seed {seed} depth {depth} {evaluator:?}");
                assert_eq!(result.best_move, Some(best), "seed {seed} depth {depth} {evaluator:?}");
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_evaluators_antisymmetric_on_random_positions() {
    for seed in 100..130 {
        let Some((board, _)) = random_position(seed, 20) else {
            continue;
        };
        for evaluator in [Evaluator::Basic, Evaluator::Advanced] {
            assert_eq!(
                evaluator.evaluate(&board, Player::A),
                -evaluator.evaluate(&board, Player::B)
            );
        }
    }
}

#[test]
fn test_easy_corner_preference() {
    // B on (6,6) and A on (5,5): A can take (7,7) among its opening moves
    let mut board = Board::new();
    board.set(Pos::new(6, 6), Cell::B);
    board.set(Pos::new(5, 5), Cell::A);
    let moves = legal_moves(&board, Player::A);
    let corners: Vec<Pos> = moves.iter().copied().filter(|p| CORNERS.contains(p)).collect();
    assert_eq!(corners, vec![Pos::new(7, 7)]);

    let mut engine = AIEngine::with_seed(Difficulty::Easy, 99);
    let trials = 3000;
    let mut corner_hits = 0;
    for _ in 0..trials {
        let result = engine.get_move_with_stats(&board, Player::A, &moves);
        if result.best_move == Some(Pos::new(7, 7)) {
            corner_hits += 1;
        }
        assert_ne!(result.search_type, SearchType::AlphaBeta);
    }

    // Uniform would be trials / moves.len(); expected here is 0.3 + 0.7 / n of all trials
    let uniform = trials / moves.len();
    assert!(corner_hits > uniform, "{corner_hits} corner picks, uniform {uniform}");
}

#[test]
fn test_hard_picks_legal_moves_through_a_game() {
    let mut engine = AIEngine::with_seed(Difficulty::Hard, 3);
    let mut board = Board::new();
    let mut player = Player::A;

    for _ in 0..6 {
        let moves = legal_moves(&board, player);
        if moves.is_empty() {
            break;
        }
        let result = engine.get_move_with_stats(&board, player, &moves);
        let pos = result.best_move.unwrap();
        assert!(moves.contains(&pos));
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(result.completed);
        board = apply_move(&board, pos, player);
        player = player.opponent();
    }
}
