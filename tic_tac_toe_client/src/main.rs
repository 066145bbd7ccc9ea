mod config;
mod game_app;

use crate::config::Config;
use crate::game_app::{GameApp, WINDOW_TITLE};

use eframe::egui;
use tic_tac_toe_core::{GameState, JsonScoreStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("Using score file {}", config.scores_path.display());
    let game = GameState::new_or_empty(JsonScoreStore::new(config.scores_path));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([400.0, 350.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(GameApp::new(game)))),
    )
}
