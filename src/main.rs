//! Othello GUI
//!
//! Play against the computer, hot-seat, or online through a room server.

use othello::config::AppConfig;
use othello::ui::OthelloApp;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("othello=info")))
        .init();

    let path = AppConfig::default_path();
    let config = match AppConfig::load_or_default(&path) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "bad config, using defaults");
            AppConfig::default()
        }
    };
    info!(difficulty = config.ai.difficulty.name(), server = %config.network.server_addr, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([480.0, 400.0])
            .with_title("Othello"),
        ..Default::default()
    };

    eframe::run_native(
        "Othello",
        options,
        Box::new(|cc| Ok(Box::new(OthelloApp::new(cc, config)))),
    )
}
