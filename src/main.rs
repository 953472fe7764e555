use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui;
use hotel_dash::app::HotelDashApp;
use hotel_dash::data;
use hotel_dash::state::AppState;

/// Loaded at startup when present and no path argument is given.
const DEFAULT_DATA_FILE: &str = "hotel_bookings.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut state = AppState::default();
    if let Some(path) = startup_file() {
        let dataset = data::loader::load_file(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} bookings ({} years, {} countries) from {}",
            dataset.len(),
            dataset.years.len(),
            dataset.countries.len(),
            path.display()
        );
        state.set_dataset(dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lisboa Hotel Booking Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(HotelDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}

/// Resolve the startup dataset: an explicit path argument, or the default
/// file when it exists. With neither, the app starts empty and data is
/// loaded via File → Open….
fn startup_file() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(PathBuf::from(arg));
    }
    let default = PathBuf::from(DEFAULT_DATA_FILE);
    default.exists().then_some(default)
}
