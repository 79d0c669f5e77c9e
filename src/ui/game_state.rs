//! Local game controller for the GUI
//!
//! Wraps the rules engine's [`GameState`] for hot-seat and computer games.
//! The computer thinks on a background thread; each request carries a
//! ticket (generation number plus stop flag) and a reply is only applied if
//! its ticket is still current and the computer is still the side to move.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::{AIEngine, Difficulty, GameState, MoveResult, Outcome, Player, Pos};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans at one screen
    HotSeat,
    /// Human against the computer
    VsComputer { human: Player, difficulty: Difficulty },
    /// Against a remote player through the room server
    Online,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::VsComputer {
            human: Player::A,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Identifies one computer move request.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub generation: u64,
    pub stop: Arc<AtomicBool>,
}

/// Worker reply, tagged with the generation it was computed for.
#[derive(Debug)]
pub struct AiReply {
    pub generation: u64,
    pub result: MoveResult,
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<AiReply>,
        start_time: Instant,
        ticket: Ticket,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// A hot-seat or computer game
pub struct LocalGame {
    pub game: GameState,
    pub mode: GameMode,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Player)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    ai_config: AiConfig,
    generation: u64,
}

impl LocalGame {
    pub fn new(mode: GameMode, ai_config: AiConfig) -> Self {
        Self {
            game: GameState::new(),
            mode,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            ai_config,
            generation: 0,
        }
    }

    /// New game in the same mode. Any pending computer move is dropped.
    pub fn reset(&mut self) {
        self.cancel_ai();
        self.game.reset();
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        self.message = None;
    }

    /// Switch mode and start over.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self.mode {
            GameMode::VsComputer { difficulty, .. } => Some(difficulty),
            _ => None,
        }
    }

    /// Change the computer's tier mid-game. A search in flight is abandoned and restarted.
    pub fn set_difficulty(&mut self, new: Difficulty) {
        if let GameMode::VsComputer { difficulty, .. } = &mut self.mode {
            if *difficulty != new {
                *difficulty = new;
                self.cancel_ai();
            }
        }
    }

    /// Side the computer plays, if any
    pub fn ai_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::VsComputer { human, .. } => Some(human.opponent()),
            _ => None,
        }
    }

    pub fn is_human_turn(&self) -> bool {
        self.ai_player() != Some(self.game.to_move)
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.game.is_terminal() && self.ai_player() == Some(self.game.to_move)
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Human click. Illegal cells and moves after the end are ignored.
    pub fn try_move(&mut self, pos: Pos) -> Result<Outcome, String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        Ok(self.play(pos))
    }

    /// Submit a move for the side to move and record it.
    fn play(&mut self, pos: Pos) -> Outcome {
        let player = self.game.to_move;
        let outcome = self.game.submit_move(pos);

        match outcome {
            Outcome::Applied | Outcome::MoveSkipped(_) => {
                self.move_history.push((pos, player));
                self.last_move = Some(pos);
                self.move_timer.stop();
                self.message = match outcome {
                    Outcome::MoveSkipped(skipped) => Some(format!("{} has no moves, turn skipped", skipped.name())),
                    _ => None,
                };
                if !self.game.is_terminal() {
                    self.move_timer.start();
                }
            }
            Outcome::IllegalMove | Outcome::GameOver => {}
        }
        outcome
    }

    /// Start the computer's move if it is its turn and nothing is pending.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        let Some(difficulty) = self.difficulty() else {
            return;
        };

        let board = self.game.board;
        let color = self.game.to_move;
        let moves = self.game.legal_moves();
        let delay = self.think_delay(difficulty);
        let ticket = Ticket {
            generation: self.generation,
            stop: Arc::new(AtomicBool::new(false)),
        };
        let worker_ticket = ticket.clone();

        let (tx, rx) = channel();

        thread::spawn(move || {
            if !sleep_unless_stopped(delay, &worker_ticket.stop) {
                return;
            }
            let mut engine = AIEngine::with_stop_flag(difficulty, Arc::clone(&worker_ticket.stop));
            let result = engine.get_move_with_stats(&board, color, &moves);
            if worker_ticket.stop.load(Ordering::Relaxed) {
                return;
            }
            let _ = tx.send(AiReply {
                generation: worker_ticket.generation,
                result,
            });
        });

        debug!(generation = ticket.generation, ?color, delay_ms = delay.as_millis() as u64, "ai thinking");
        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            ticket,
        };
    }

    /// Stop any pending computer move. Its reply, if it still arrives, is ignored.
    pub fn cancel_ai(&mut self) {
        if let AiState::Thinking { ticket, .. } = &self.ai_state {
            ticket.stop.store(true, Ordering::Relaxed);
            debug!(generation = ticket.generation, "ai cancelled");
        }
        self.ai_state = AiState::Idle;
        self.generation += 1;
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let reply = match &self.ai_state {
            AiState::Thinking { receiver, start_time, .. } => match receiver.try_recv() {
                Ok(reply) => Some((reply, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("ai worker exited without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((reply, elapsed)) = reply else {
            return;
        };
        self.ai_state = AiState::Idle;

        if reply.generation != self.generation || !self.is_ai_turn() {
            debug!(generation = reply.generation, current = self.generation, "discarding stale ai reply");
            return;
        }

        self.move_timer.set_ai_time(elapsed);
        let best_move = reply.result.best_move;
        self.last_ai_result = Some(reply.result);

        match best_move {
            Some(pos) => {
                let outcome = self.play(pos);
                if outcome == Outcome::IllegalMove {
                    warn!(?pos, "ai proposed an illegal move");
                    self.message = Some("AI could not find a move".to_string());
                }
            }
            None => self.message = Some("AI could not find a move".to_string()),
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Tier delay plus random jitter
    fn think_delay(&self, difficulty: Difficulty) -> Duration {
        let base = self.ai_config.base_delay(difficulty);
        let jitter_ms = self.ai_config.jitter().as_millis() as u64;
        if jitter_ms == 0 {
            return base;
        }
        base + Duration::from_millis(rand::rng().random_range(0..jitter_ms))
    }
}

/// Sleep for `total` in short steps. Returns false if `stop` was raised first.
fn sleep_unless_stopped(total: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(Duration::from_millis(10)));
    }
}
