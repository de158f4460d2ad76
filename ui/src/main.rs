#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context as _;
use log::{debug, info};
use snaily_business::{BusinessConfig, FeatureFlags, Route, load_cad_settings};
use snaily_ui::{SnailyApp, state::State};

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = dotenvy::dotenv() {
        debug!("No .env file loaded: {err}");
    }

    let config = BusinessConfig::from_env().context("invalid configuration")?;
    let route = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or_default();
    info!("Using API {} starting at {route}", config.api_url());

    // Commands are spawned on this runtime from the UI thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;
    let _guard = runtime.enter();

    let settings = runtime.block_on(load_cad_settings(&config));
    let features = FeatureFlags::from_settings(&settings);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.name.as_deref().unwrap_or("SnailyCAD"))
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SnailyCAD",
        native_options,
        Box::new(move |_cc| {
            let state = State::new(config, features, route);
            Ok(Box::new(SnailyApp::new(state)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))
}
