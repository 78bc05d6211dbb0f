//! qladmin - Quake Live server administration, settings core
//!
//! Main entry point. Runs the settings controller headless: it loads the
//! configuration, brings the live module state in line with it and reports
//! what is active.
//!
//! # Overview
//!
//! The binary initializes:
//! - Bootstrap settings ([`AppSettings`], `QLADMIN_*` environment overrides)
//! - Logging infrastructure (daily file rotation + console output)
//! - Tokio async runtime (module entry/exit actions)
//! - Configuration ([`ConfigManager`], `qladmin.yaml` in the data directory)
//! - Live module state ([`StateManager`])
//! - The settings controller ([`SettingsController`])
//!
//! # Execution Flow
//!
//! 1. Load bootstrap settings
//! 2. Initialize logging → logs/qladmin.<date>
//! 3. Create tokio runtime with 2 worker threads
//! 4. Read the configuration document (defaults if the file is missing)
//! 5. Create StateManager from the document
//! 6. Create SettingsController with the offline session and logging effects
//! 7. Populate every tab, run queued UI requests, report the status line
//! 8. Wait for module actions, log metrics, shut the runtime down

use anyhow::Result;
use qladmin::services::{LoggingEffects, OfflineSession};
use qladmin::ui::{Collaborators, ListStores};
use qladmin::{
    APP_NAME, AppSettings, ConfigManager, Metrics, ModuleRuntimeState, SettingsController,
    StateManager, VERSION,
};
use std::sync::Arc;

fn main() -> Result<()> {
    let settings = AppSettings::load()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = qladmin::logging::setup_from_settings(&settings)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::debug!("Bootstrap settings: {:?}", settings);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("qladmin-worker")
        .build()?;

    tracing::info!("Tokio runtime initialized with {} worker threads", 2);

    let config_manager = Arc::new(ConfigManager::new(&settings.data_dir)?);
    let doc = config_manager.read()?;
    tracing::info!("Configuration loaded from {}", config_manager.config_path());

    let state_manager = StateManager::with_state(ModuleRuntimeState::from_document(&doc));
    tracing::info!(
        "State manager initialized with {} active modules",
        state_manager.read(|s| s.active_modules().len())
    );

    let metrics = Arc::new(Metrics::new());
    let collaborators = Collaborators {
        session: Arc::new(OfflineSession::new()),
        effects: Arc::new(LoggingEffects),
        stores: ListStores::default(),
    };

    let mut controller = SettingsController::new(
        Arc::clone(&config_manager),
        state_manager.clone(),
        collaborators,
        runtime.handle().clone(),
        Arc::clone(&metrics),
    );
    let _forwarder = controller.follow_state_changes();

    controller.populate_all_tabs()?;
    let handled = controller.pump();
    tracing::debug!("Handled {} queued UI requests", handled);

    tracing::info!("{}", controller.view().status_line);
    if !doc.core.has_identity() {
        tracing::warn!(
            "Owner and account names are not set; edit {} before monitoring a server",
            config_manager.config_path()
        );
    }

    runtime.block_on(controller.wait_for_side_effects());
    metrics.log_summary();

    drop(controller);
    runtime.shutdown_timeout(std::time::Duration::from_secs(5));

    tracing::info!("Application shutdown complete");
    Ok(())
}
