use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable prefix for bootstrap overrides (e.g. `QLADMIN_DATA_DIR`).
pub const ENV_PREFIX: &str = "QLADMIN";

/// Settings the binary needs before the configuration document can be read.
///
/// Loaded from built-in defaults layered under `QLADMIN_*` environment
/// variables. The document itself lives in [`ConfigManager`](super::ConfigManager).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppSettings {
    pub data_dir: String,
    pub log_dir: String,
    pub debug: bool,
    pub console_log: bool,
    /// Write the log file as JSON lines instead of plain text.
    pub json_logs: bool,
}

impl AppSettings {
    /// Load settings from defaults and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings with an explicit environment source.
    ///
    /// Split out so tests can supply variables without touching the process
    /// environment.
    pub fn load_from(environment: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("data_dir", "qladmin data")?
            .set_default("log_dir", "logs")?
            .set_default("debug", false)?
            .set_default("console_log", true)?
            .set_default("json_logs", false)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to assemble application settings")?;

        settings
            .try_deserialize()
            .context("Failed to parse application settings")
    }
}
