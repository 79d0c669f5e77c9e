//! Main application for the Othello GUI

use std::time::Duration;

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::net::{NetClient, NetEvent, OnlineSession, Phase};
use crate::{Difficulty, GameState, Player, Pos, Status};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::{GameMode, LocalGame};
use super::theme::*;

/// Main Othello application
pub struct OthelloApp {
    config: AppConfig,
    local: LocalGame,
    online: OnlineSession,
    client: Option<NetClient>,
    board_view: BoardView,
    show_hints: bool,
    show_stats: bool,
}

impl OthelloApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let mode = GameMode::VsComputer {
            human: config.ai.human_player,
            difficulty: config.ai.difficulty,
        };
        Self {
            local: LocalGame::new(mode, config.ai.clone()),
            online: OnlineSession::new(config.network.player_name.clone()),
            client: None,
            board_view: BoardView::default(),
            show_hints: true,
            show_stats: true,
            config,
        }
    }

    fn is_online(&self) -> bool {
        self.local.mode == GameMode::Online
    }

    fn start_mode(&mut self, mode: GameMode) {
        if self.is_online() && mode != GameMode::Online {
            self.disconnect();
        }
        info!(?mode, "new game");
        self.local.set_mode(mode);
    }

    fn new_game(&mut self) {
        if self.is_online() {
            if self.online.phase == Phase::Playing {
                self.online.reset_game();
            }
        } else {
            self.local.reset();
        }
    }

    // ---- network ---------------------------------------------------------

    /// Start dialing; the lobby opens once the client reports `Connected`.
    fn connect(&mut self) {
        self.online.clear_error();
        match NetClient::connect(&self.config.network.server_addr) {
            Ok(client) => self.client = Some(client),
            Err(err) => {
                warn!(%err, "connect failed");
                self.online.error = Some(err.to_string());
            }
        }
    }

    fn disconnect(&mut self) {
        if let Some(mut client) = self.client.take() {
            client.disconnect();
        }
        self.online.go_to_menu();
    }

    /// Drain incoming frames, then send whatever the session queued.
    fn poll_network(&mut self) {
        let Some(client) = self.client.as_mut() else {
            return;
        };

        let mut lost = None;
        while let Some(event) = client.try_recv() {
            match event {
                NetEvent::Connected => self.online.enter_lobby(),
                NetEvent::Message(msg) => self.online.apply(msg),
                NetEvent::Malformed(err) => warn!(%err, "ignoring malformed frame"),
                NetEvent::Disconnected(reason) => {
                    lost = Some(reason);
                    break;
                }
            }
        }

        if lost.is_none() {
            for msg in self.online.take_outgoing() {
                if let Err(err) = client.send(&msg) {
                    lost = Some(Some(err.to_string()));
                    break;
                }
            }
        }

        if let Some(reason) = lost {
            self.client = None;
            self.online.on_disconnect(reason);
        }
    }

    // ---- panels ----------------------------------------------------------

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    let difficulty = self.local.difficulty().unwrap_or(self.config.ai.difficulty);
                    if ui.button("Vs Computer (play Purple)").clicked() {
                        self.start_mode(GameMode::VsComputer {
                            human: Player::A,
                            difficulty,
                        });
                        ui.close_menu();
                    }
                    if ui.button("Vs Computer (play Cyan)").clicked() {
                        self.start_mode(GameMode::VsComputer {
                            human: Player::B,
                            difficulty,
                        });
                        ui.close_menu();
                    }
                    if ui.button("Hot Seat").clicked() {
                        self.start_mode(GameMode::HotSeat);
                        ui.close_menu();
                    }
                    if ui.button("Online").clicked() {
                        self.start_mode(GameMode::Online);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("New Game (N)").clicked() {
                        self.new_game();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_hints, "Move Hints (H)");
                    ui.checkbox(&mut self.show_stats, "AI Statistics");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.local.mode {
                        GameMode::VsComputer { human, difficulty } => {
                            format!("Vs Computer ({}) - You: {}", difficulty.name(), human.name())
                        }
                        GameMode::HotSeat => "Hot Seat".to_string(),
                        GameMode::Online => match &self.client {
                            Some(client) => format!("Online - {}", client.addr()),
                            None => "Online - not connected".to_string(),
                        },
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                Self::render_title_card(ui);
                ui.add_space(12.0);

                if self.is_online() {
                    self.render_online_side(ui);
                } else {
                    self.render_local_side(ui);
                }
            });
    }

    fn render_local_side(&mut self, ui: &mut egui::Ui) {
        let game = self.local.game;
        self.render_turn_card(ui, &game);
        ui.add_space(10.0);
        Self::render_score_card(ui, &game);
        ui.add_space(10.0);

        if let Some(difficulty) = self.local.difficulty() {
            self.render_difficulty_card(ui, difficulty);
            ui.add_space(10.0);
        }

        if self.show_stats && self.local.ai_player().is_some() {
            self.render_stats_card(ui);
            ui.add_space(10.0);
        }

        if let Status::Terminal { winner } = game.status {
            if Self::render_game_over_card(ui, &game, winner) {
                self.new_game();
            }
            ui.add_space(10.0);
        }

        if let Some(msg) = self.local.message.clone() {
            Self::render_message_card(ui, &msg, false);
        }
    }

    fn render_online_side(&mut self, ui: &mut egui::Ui) {
        if let Some(game) = self.online.game {
            self.render_turn_card(ui, &game);
            ui.add_space(10.0);
            Self::render_score_card(ui, &game);
            ui.add_space(10.0);
        }

        if self.online.room_id.is_some() {
            self.render_room_card(ui);
            ui.add_space(10.0);
        }

        if let Some(game) = self.online.game {
            if let Status::Terminal { winner } = game.status {
                if Self::render_game_over_card(ui, &game, winner) {
                    self.online.reset_game();
                }
                ui.add_space(10.0);
            }
        }

        if let Some(msg) = self.online.error.clone() {
            Self::render_message_card(ui, &msg, true);
        }
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(PANEL_HEADER)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●").size(20.0).color(DISC_A));
            ui.label(RichText::new("●").size(20.0).color(DISC_B));
            ui.add_space(4.0);
            ui.label(RichText::new("OTHELLO").size(22.0).strong().color(TEXT_PRIMARY));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui, game: &GameState) {
        Self::card_frame().show(ui, |ui| {
            let player = game.to_move;
            let (fill, _) = disc_colors(player);

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 20.0, fill);
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(player.name().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));
                    let (text, color) = self.turn_status(game);
                    ui.label(RichText::new(text).size(12.0).color(color));
                });
            });

            if !self.is_online() {
                let elapsed = match self.local.ai_thinking_elapsed() {
                    Some(elapsed) => elapsed,
                    None => self.local.move_timer.elapsed(),
                };
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(14.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn turn_status(&self, game: &GameState) -> (String, egui::Color32) {
        if game.is_terminal() {
            return ("Game over".to_string(), TEXT_SECONDARY);
        }
        if self.is_online() {
            return if self.online.is_my_turn() {
                ("Your turn".to_string(), TIMER_NORMAL)
            } else {
                ("Opponent's turn".to_string(), TEXT_SECONDARY)
            };
        }
        if self.local.is_ai_thinking() {
            ("AI thinking...".to_string(), TIMER_WARNING)
        } else if self.local.is_ai_turn() {
            ("AI to move".to_string(), TIMER_WARNING)
        } else {
            ("Your turn".to_string(), TIMER_NORMAL)
        }
    }

    fn render_score_card(ui: &mut egui::Ui, game: &GameState) {
        let score = game.scoreboard();
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            for player in [Player::A, Player::B] {
                let (fill, _) = disc_colors(player);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").size(18.0).color(fill));
                    ui.label(RichText::new(player.name()).size(13.0).color(TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut text = RichText::new(score.count(player).to_string()).size(18.0).color(TEXT_PRIMARY);
                        if score.leader() == Some(player) {
                            text = text.strong();
                        }
                        ui.label(text);
                    });
                });
            }
        });
    }

    fn render_difficulty_card(&mut self, ui: &mut egui::Ui, current: Difficulty) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("DIFFICULTY").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for difficulty in Difficulty::ALL {
                    if ui.selectable_label(difficulty == current, difficulty.name()).clicked() {
                        self.local.set_difficulty(difficulty);
                    }
                }
            });
        });
    }

    fn render_stats_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI STATS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.local.last_ai_result else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{:?}", result.search_type))
                            .size(11.0)
                            .strong()
                            .color(TIMER_NORMAL),
                    );
                    ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                    });
                });
            });

            if let Some(pos) = result.best_move {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("→ {}", cell_name(pos))).size(12.0).strong().color(TEXT_PRIMARY));
            }
            if let Some(ai_time) = self.local.move_timer.ai_thinking_time {
                ui.label(
                    RichText::new(format!("Last reply after {:.2}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_MUTED),
                );
            }
        });
    }

    fn render_room_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let room = self.online.room_id.clone().unwrap_or_default();
            ui.label(RichText::new(format!("ROOM {room}")).size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            for (i, player) in self.online.players.iter().enumerate() {
                let side = Player::from_number(i as u8 + 1).unwrap_or(Player::A);
                let (fill, _) = disc_colors(side);
                let me = self.online.my_player_id.as_deref() == Some(player.id.as_str());
                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").size(16.0).color(fill));
                    let name = if me {
                        format!("{} (you)", player.name)
                    } else {
                        player.name.clone()
                    };
                    ui.label(RichText::new(name).size(12.0).color(TEXT_PRIMARY));
                });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Leave Room").clicked() {
                    self.online.leave_room();
                }
                if self.online.phase == Phase::Playing && ui.button("Reset").clicked() {
                    self.online.reset_game();
                }
            });
        });
    }

    /// Returns true when "New Game" was clicked
    fn render_game_over_card(ui: &mut egui::Ui, game: &GameState, winner: Option<Player>) -> bool {
        let score = game.scoreboard();
        let mut clicked = false;

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);

                    let headline = match winner {
                        Some(player) => format!("{} wins!", player.name()),
                        None => "Draw".to_string(),
                    };
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(
                        RichText::new(format!("{} - {}", score.count_a, score.count_b))
                            .size(14.0)
                            .color(TEXT_SECONDARY),
                    );

                    ui.add_space(12.0);
                    if ui.button("New Game").clicked() {
                        clicked = true;
                    }
                });
            });
        clicked
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str, is_error: bool) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                let color = if is_error { TEXT_ERROR } else { TEXT_PRIMARY };
                ui.label(RichText::new(msg).size(11.0).color(color));
            });
    }

    // ---- central area ----------------------------------------------------

    fn render_central(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            if self.is_online() {
                match self.online.phase {
                    Phase::Menu => self.render_connect_form(ui),
                    Phase::Lobby => self.render_lobby(ui),
                    Phase::Waiting => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(80.0);
                            ui.label(RichText::new("Waiting for an opponent...").size(20.0).color(TEXT_PRIMARY));
                        });
                    }
                    Phase::Playing => self.render_online_board(ui),
                }
            } else {
                self.render_local_board(ui);
            }
        });
    }

    fn render_local_board(&mut self, ui: &mut egui::Ui) {
        let game = self.local.game;
        let interactive = !game.is_terminal() && self.local.is_human_turn() && !self.local.is_ai_thinking();
        let hints = if interactive { game.legal_moves() } else { Vec::new() };

        let overlay = BoardOverlay {
            mover: interactive.then_some(game.to_move),
            hints: &hints,
            show_hints: self.show_hints,
            last_move: self.local.last_move,
        };

        if let Some(pos) = self.board_view.show(ui, &game.board, &overlay) {
            if let Err(msg) = self.local.try_move(pos) {
                self.local.message = Some(msg);
            }
        }
    }

    fn render_online_board(&mut self, ui: &mut egui::Ui) {
        let Some(game) = self.online.game else {
            ui.label(RichText::new("Waiting for the server...").color(TEXT_SECONDARY));
            return;
        };
        let my_turn = self.online.is_my_turn();
        let hints = if my_turn { self.online.valid_moves.clone() } else { Vec::new() };

        let overlay = BoardOverlay {
            mover: if my_turn { self.online.my_player } else { None },
            hints: &hints,
            show_hints: self.show_hints,
            last_move: None,
        };

        if let Some(pos) = self.board_view.show(ui, &game.board, &overlay) {
            // Rejected requests need no feedback; the board simply does not change
            let _ = self.online.request_move(pos);
        }
    }

    fn render_connect_form(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("Play Online").size(24.0).strong().color(TEXT_PRIMARY));
            ui.add_space(16.0);

            ui.label(RichText::new("Player name").color(TEXT_SECONDARY));
            ui.add(egui::TextEdit::singleline(&mut self.online.player_name).desired_width(220.0));
            ui.add_space(8.0);
            ui.label(RichText::new("Server").color(TEXT_SECONDARY));
            ui.add(egui::TextEdit::singleline(&mut self.config.network.server_addr).desired_width(220.0));
            ui.add_space(12.0);

            let connecting = self.client.as_ref().is_some_and(NetClient::is_connecting);
            if connecting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Connecting...").color(TEXT_SECONDARY));
                });
                if ui.button("Cancel").clicked() {
                    self.disconnect();
                }
            } else if ui.button("Connect").clicked() {
                self.connect();
            }
        });
    }

    fn render_lobby(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Name").color(TEXT_SECONDARY));
            ui.add(egui::TextEdit::singleline(&mut self.online.player_name).desired_width(180.0));
            if ui.button("Create Room").clicked() {
                self.online.create_room();
            }
            if ui.button("Disconnect").clicked() {
                self.disconnect();
            }
        });
        ui.add_space(12.0);
        ui.label(RichText::new("AVAILABLE ROOMS").size(10.0).color(TEXT_MUTED));
        ui.separator();

        if self.online.rooms.is_empty() {
            ui.label(RichText::new("No open rooms").color(TEXT_MUTED));
            return;
        }

        let mut join = None;
        for room in &self.online.rooms {
            Self::card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("Room #{}", room.short_id())).strong().color(TEXT_PRIMARY));
                        ui.label(
                            RichText::new(format!("Host: {}  ({}/2)", room.host, room.players.len()))
                                .size(11.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = if room.is_full() { "Full" } else { "Join" };
                        if ui.add_enabled(!room.is_full(), egui::Button::new(label)).clicked() {
                            join = Some(room.id.clone());
                        }
                    });
                });
            });
            ui.add_space(6.0);
        }

        if let Some(room_id) = join {
            self.online.join_room(&room_id);
        }
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        // Text fields own the keyboard while focused
        if ctx.wants_keyboard_input() {
            return;
        }
        let (new_game, toggle_hints) = ctx.input(|i| (i.key_pressed(egui::Key::N), i.key_pressed(egui::Key::H)));
        if toggle_hints {
            self.show_hints = !self.show_hints;
        }
        if new_game {
            self.new_game();
        }
    }
}

/// Cell name as shown by the board labels, e.g. "d3"
fn cell_name(pos: Pos) -> String {
    format!("{}{}", (b'a' + pos.col) as char, pos.row + 1)
}

impl eframe::App for OthelloApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.poll_network();
        self.local.check_ai_result();
        if self.local.is_ai_turn() && !self.local.is_ai_thinking() {
            self.local.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_central(ctx);

        if self.local.is_ai_thinking() {
            ctx.request_repaint();
        } else if self.client.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
