pub mod app_settings;

pub use app_settings::AppSettings;

use crate::models::ConfigurationDocument;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the configuration document inside the data directory.
pub const CONFIG_FILE_NAME: &str = "qladmin.yaml";

/// Configuration manager for loading and saving the YAML configuration document.
///
/// This is the only persistent authority for settings. Callers read a fresh
/// [`ConfigurationDocument`] before every mutating action instead of holding a
/// long-lived copy, so edits made elsewhere (in-game commands, IRC) are not
/// clobbered.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified data directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `qladmin.yaml` (e.g., "qladmin data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        let manager = Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        };
        manager.verify_location()?;

        Ok(manager)
    }

    /// Make sure the data directory exists and is a directory.
    pub fn verify_location(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("Failed to create config directory: {}", self.config_dir)
            })?;
            tracing::info!("Created config directory {}", self.config_dir);
        } else if !self.config_dir.is_dir() {
            bail!("Config location is not a directory: {}", self.config_dir);
        }

        Ok(())
    }

    /// Read the configuration document.
    ///
    /// # Returns
    /// The loaded document, with every missing field defaulted, or the default
    /// document if the file doesn't exist yet.
    pub fn read(&self) -> Result<ConfigurationDocument> {
        if !self.config_path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
            return Ok(ConfigurationDocument::default());
        }

        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        if file_contents.trim().is_empty() {
            tracing::warn!("Config file {} is empty, using defaults", self.config_path);
            return Ok(ConfigurationDocument::default());
        }

        let doc: ConfigurationDocument = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::debug!("Loaded config from {}", self.config_path);
        Ok(doc)
    }

    /// Write the configuration document.
    ///
    /// The document is serialized to a sibling temporary file which then
    /// replaces the real file, so readers never observe a half-written file.
    pub fn write(&self, doc: &ConfigurationDocument) -> Result<()> {
        self.verify_location()?;

        let yaml_string =
            serde_yaml_ng::to_string(doc).context("Failed to serialize config to YAML")?;

        let temp_path = self.config_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_string)
            .with_context(|| format!("Failed to write temporary config: {}", temp_path))?;

        if let Err(e) = fs::rename(&temp_path, &self.config_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e)
                .with_context(|| format!("Failed to replace config: {}", self.config_path));
        }

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Overwrite the stored document with defaults.
    ///
    /// # Returns
    /// The default document that was written
    pub fn restore_defaults(&self) -> Result<ConfigurationDocument> {
        let doc = ConfigurationDocument::default();
        self.write(&doc)?;
        tracing::warn!("Restored default configuration at {}", self.config_path);
        Ok(doc)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
