mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::SalaryDashboardApp;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let initial_data = config::Args::parse().data_path();
    match &initial_data {
        Some(path) => log::info!("Opening {} at start-up", path.display()),
        None => log::info!("No dataset given; waiting for File → Open"),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SalaryDashboardApp::with_initial_data(
                initial_data.as_deref(),
            )))
        }),
    )
}
