mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Result;
use app::ZooDashboardApp;
use config::{CONFIG_FILE, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let dataset = data::loader::cached_dataset(&config.data_path).inspect_err(|e| {
        log::error!("Failed to load dataset: {e:#}");
    })?;
    if dataset.is_empty() {
        log::warn!("{} contains no usable records", config.data_path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset, config.export_path.clone());
    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(ZooDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
