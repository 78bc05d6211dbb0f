// qladmin - Settings core of a Quake Live server administration tool
//
// This is the library crate containing the synchronization between the
// settings window, the configuration file and the live modules.
// The binary crate (main.rs) runs it headless.

pub mod activation;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;
pub mod validation;

// Re-export commonly used types for convenience
pub use activation::ActivationController;
pub use config::{AppSettings, ConfigManager};
pub use error::{SyncError, SyncResult};
pub use metrics::Metrics;
pub use models::{ConfigurationDocument, ModuleKind, ModuleRuntimeState, SettingsGroup};
pub use state::{StateChange, StateManager};
pub use ui::SettingsController;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
