//! Board rendering for the Othello GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::rules::flips;
use crate::{Board, Player, Pos, BOARD_SIZE};

use super::theme::*;

/// What the board should show besides the discs.
pub struct BoardOverlay<'a> {
    /// Side whose clicks are accepted; `None` while input is locked
    pub mover: Option<Player>,
    /// Cells to mark as playable
    pub hints: &'a [Pos],
    pub show_hints: bool,
    pub last_move: Option<Pos>,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell, if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<Pos> {
        let available_size = ui.available_size();

        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / BOARD_SIZE as f32;

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BORDER);
        painter.rect_filled(self.play_area(), CornerRadius::ZERO, BOARD_BG);

        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        self.draw_discs(&painter, board);

        if let Some(pos) = overlay.last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        let Some(mover) = overlay.mover else {
            return None;
        };

        if overlay.show_hints {
            for &pos in overlay.hints {
                painter.circle_filled(self.cell_center(pos), self.cell_size * HINT_RADIUS_RATIO, hint_dot());
            }
        }

        let board_pos = response.hover_pos().and_then(|p| self.screen_to_board(p))?;

        if overlay.hints.contains(&board_pos) {
            self.draw_flip_preview(&painter, board, board_pos, mover);
        }

        response.clicked().then_some(board_pos)
    }

    fn play_area(&self) -> Rect {
        self.board_rect.shrink(BOARD_MARGIN)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let area = self.play_area();

        for i in 0..=BOARD_SIZE {
            let offset = i as f32 * self.cell_size;
            painter.line_segment(
                [Pos2::new(area.min.x + offset, area.min.y), Pos2::new(area.min.x + offset, area.max.y)],
                stroke,
            );
            painter.line_segment(
                [Pos2::new(area.min.x, area.min.y + offset), Pos2::new(area.max.x, area.min.y + offset)],
                stroke,
            );
        }
    }

    /// Column letters a-h along the top, row numbers 1-8 down the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        let area = self.play_area();

        for i in 0..BOARD_SIZE {
            let mid = (i as f32 + 0.5) * self.cell_size;
            let letter = (b'a' + i as u8) as char;
            painter.text(
                Pos2::new(area.min.x + mid, self.board_rect.min.y + BOARD_MARGIN * 0.5),
                egui::Align2::CENTER_CENTER,
                letter,
                font.clone(),
                TEXT_SECONDARY,
            );
            painter.text(
                Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.5, area.min.y + mid),
                egui::Align2::CENTER_CENTER,
                format!("{}", i + 1),
                font.clone(),
                TEXT_SECONDARY,
            );
        }
    }

    fn draw_discs(&self, painter: &Painter, board: &Board) {
        for player in [Player::A, Player::B] {
            for pos in board.discs(player).iter_ones() {
                self.draw_disc(painter, pos, player);
            }
        }
    }

    fn draw_disc(&self, painter: &Painter, pos: Pos, player: Player) {
        let center = self.cell_center(pos);
        let radius = self.cell_size * DISC_RADIUS_RATIO;
        let (fill, highlight) = disc_colors(player);

        painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, DISC_SHADOW);
        painter.circle_filled(center, radius, fill);
        painter.circle_filled(center + Vec2::splat(-radius * 0.3), radius * 0.25, highlight);
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        painter.circle_filled(self.cell_center(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Ghost disc on the hovered cell, rings on the discs it would flip
    fn draw_flip_preview(&self, painter: &Painter, board: &Board, pos: Pos, mover: Player) {
        let radius = self.cell_size * DISC_RADIUS_RATIO;
        let (fill, _) = disc_colors(mover);
        let ghost = Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), 110);
        painter.circle_filled(self.cell_center(pos), radius, ghost);

        let stroke = Stroke::new(3.0, flip_preview());
        for flipped in flips(board, pos, mover).iter_ones() {
            painter.circle_stroke(self.cell_center(flipped), radius + 1.0, stroke);
        }
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.play_area().min;
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        if Pos::is_valid(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Centre of a cell in screen coordinates
    pub fn cell_center(&self, pos: Pos) -> Pos2 {
        let area = self.play_area();
        Pos2::new(
            area.min.x + (pos.col as f32 + 0.5) * self.cell_size,
            area.min.y + (pos.row as f32 + 0.5) * self.cell_size,
        )
    }
}
