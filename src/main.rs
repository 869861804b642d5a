mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::TumorDashApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard – Breast Cancer Dataset",
        options,
        Box::new(|_cc| Ok(Box::new(TumorDashApp::new(config)))),
    )
}
