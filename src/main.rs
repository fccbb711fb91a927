//! Application entry point: Content Moderation Comparison.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (writing the defaults on first run) and
//!    overlay credentials from the environment.
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build both backends from config and wire them into a [`Comparator`].
//! 5. Create pipeline channels (`command`, `result`).
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`]: blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;

use moderation_compare::{
    app::ComparisonApp,
    config::{AppConfig, AppPaths},
    llm::{TextGenerator, VertexGenerator},
    moderation::{LanguageApiClient, ModerationService},
    pipeline::{Comparator, PipelineCommand, PipelineOrchestrator, PipelineResult},
};

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (w, h) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("Content Moderation Comparison")
        .with_inner_size([w, h])
        .with_min_inner_size([640.0, 420.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Content Moderation Comparison starting up");

    // 2. Configuration (first run writes an editable settings.toml)
    let settings_file = AppPaths::new().settings_file;
    let mut config = if settings_file.exists() {
        AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        })
    } else {
        let config = AppConfig::default();
        match config.save() {
            Ok(()) => log::info!("Wrote default settings to {}", settings_file.display()),
            Err(e) => log::warn!("Could not write default settings: {e}"),
        }
        config
    };
    config.apply_env_overrides();

    if config.generation.project_id.is_empty() {
        log::warn!("No generation project configured; the Gen AI panel will report an error");
    }
    if config.moderation.api_key.is_none() && config.moderation.access_token.is_none() {
        log::warn!("No moderation credentials configured; requests will likely be rejected");
    }

    // 3. Tokio runtime (2 worker threads: one per backend call)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Backends + pipelines
    let service: Arc<dyn ModerationService> =
        Arc::new(LanguageApiClient::from_config(&config.moderation));
    let generator: Arc<dyn TextGenerator> =
        Arc::new(VertexGenerator::from_config(&config.generation));
    let comparator = Arc::new(Comparator::from_config(&config, service, generator));

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(16);
    let (result_tx, result_rx) = mpsc::channel::<PipelineResult>(32);

    // 6. Orchestrator
    rt.spawn(PipelineOrchestrator::new(comparator).run(command_rx, result_tx));

    // 7. UI (blocks until the window is closed)
    let app = ComparisonApp::new(command_tx, result_rx, config.clone());
    let options = native_options(&config);

    eframe::run_native(
        "Content Moderation Comparison",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
