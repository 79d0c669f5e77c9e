//! Theme constants for the Othello GUI

use egui::Color32;

use crate::Player;

// Board colors - felt green
pub const BOARD_BG: Color32 = Color32::from_rgb(34, 120, 70);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(20, 70, 40);
pub const GRID_LINE: Color32 = Color32::from_rgb(15, 60, 35);

// Disc colors
pub const DISC_A: Color32 = Color32::from_rgb(150, 80, 220);
pub const DISC_A_HIGHLIGHT: Color32 = Color32::from_rgb(195, 140, 245);
pub const DISC_B: Color32 = Color32::from_rgb(40, 200, 215);
pub const DISC_B_HIGHLIGHT: Color32 = Color32::from_rgb(130, 235, 245);
pub const DISC_SHADOW: Color32 = Color32::from_rgb(10, 40, 25);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);

pub fn hint_dot() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 70)
}

pub fn flip_preview() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 230, 90, 150)
}

pub fn disc_colors(player: Player) -> (Color32, Color32) {
    match player {
        Player::A => (DISC_A, DISC_A_HIGHLIGHT),
        Player::B => (DISC_B, DISC_B_HIGHLIGHT),
    }
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(32, 34, 37);
pub const PANEL_HEADER: Color32 = Color32::from_rgb(42, 44, 48);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(255, 90, 90);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const DISC_RADIUS_RATIO: f32 = 0.42;
pub const HINT_RADIUS_RATIO: f32 = 0.12;
pub const GRID_LINE_WIDTH: f32 = 1.5;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
