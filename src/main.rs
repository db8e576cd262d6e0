//! Program entry point: seeds the chaos-game engine, configures the window,
//! and launches the egui/eframe UI.

mod engine;
mod ui;

use eframe::{egui, NativeOptions};
use engine::ChaosEngine;
use log::info;
use ui::ChaosApp;

fn main() -> eframe::Result<()> {
    env_logger::init();
    info!("logger initialized");

    // One engine for the process lifetime, seeded from OS entropy.
    let engine = ChaosEngine::from_entropy();

    // eframe 0.27: configure via ViewportBuilder
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(1280.0, 720.0))
            .with_title("Chaos Canvas"),
        ..Default::default()
    };

    eframe::run_native(
        "Chaos Canvas",
        native_options,
        Box::new(move |_cc| Box::new(ChaosApp::new(engine))),
    )
}
