mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{config::DEFAULT_LOG_FILTER, load_settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::BackendCommand, controller::events::UiEvent, ui::IntakeApp,
};

#[derive(Parser, Debug)]
#[command(name = "intake-desktop", about = "Training school intake form")]
struct Args {
    /// Override the configured intake API base URL
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.api_url.as_deref());

    let fallback_filter = settings
        .as_ref()
        .map_or(DEFAULT_LOG_FILTER, |s| s.log_filter.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter)),
        )
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Training School Form")
            .with_inner_size([960.0, 860.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Training School Form",
        options,
        Box::new(|_cc| Ok(Box::new(IntakeApp::new(cmd_tx, ui_rx)))),
    )
}
