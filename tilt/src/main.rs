use anyhow::Context;
use clap::Parser;
use eframe::egui;

use tilt::cli::CliArgs;
use tilt::gui::AppState;

fn main() -> anyhow::Result<()> {
    tilt::logging::init();

    let args = CliArgs::parse();
    let config = args.resolve().context("failed to load editor config")?;
    let app = AppState::from_config(&config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([400.0, 300.0])
            .with_title("Tilt Sequencer"),
        ..Default::default()
    };

    eframe::run_native(
        "Tilt Sequencer",
        native_options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("editor window failed: {e}"))
}
