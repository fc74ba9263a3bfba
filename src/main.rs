mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::TitanicExplorerApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Dataset path: first CLI argument, or titanic.csv next to the binary.
    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("titanic.csv"));

    let mut state = AppState::default();
    match data::loader::load_file(&path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} passengers with classes {:?}",
                dataset.len(),
                dataset.class_labels
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            // Start with an empty state; File → Open still works.
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Dataset Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(TitanicExplorerApp::new(state)))),
    )
}
