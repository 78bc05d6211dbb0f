//! Shared fixtures for the settings controller integration tests.
//!
//! The controller talks to the live server and the modules through traits;
//! these fakes record every call so tests can assert on what was (and was not)
//! sent.

#![allow(dead_code)]

use async_trait::async_trait;
use camino::Utf8PathBuf;
use qladmin::models::{EloLimitOptions, IrcOptions, MotdOptions};
use qladmin::services::{ExternalActionError, ModuleEffects, MonitoringSession};
use qladmin::ui::{Collaborators, ListStores};
use qladmin::{
    ConfigManager, ConfigurationDocument, Metrics, ModuleRuntimeState, SettingsController,
    StateManager,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Debug, Default)]
pub struct RecordingSession {
    monitoring: AtomicBool,
    refuse_to_start: AtomicBool,
    pub begin_calls: AtomicUsize,
    commands: Mutex<Vec<String>>,
}

impl RecordingSession {
    pub fn monitoring() -> Self {
        let session = Self::default();
        session.monitoring.store(true, Ordering::SeqCst);
        session
    }

    pub fn refuse_to_start(&self) {
        self.refuse_to_start.store(true, Ordering::SeqCst);
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, command: String) -> Result<(), ExternalActionError> {
        self.commands.lock().unwrap().push(command);
        if self.is_monitoring() {
            Ok(())
        } else {
            Err(ExternalActionError::NotMonitoring)
        }
    }
}

impl MonitoringSession for RecordingSession {
    fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    fn begin_monitoring(&self) -> Result<(), ExternalActionError> {
        self.begin_calls.fetch_add(1, Ordering::SeqCst);
        if self.refuse_to_start.load(Ordering::SeqCst) {
            return Err(ExternalActionError::failed("connect", "server unreachable"));
        }
        self.monitoring.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_monitoring(&self) -> Result<(), ExternalActionError> {
        self.monitoring.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn kick_ban(&self, player: &str) -> Result<(), ExternalActionError> {
        self.record(format!("kickban {}", player))
    }

    fn unban(&self, player: &str) -> Result<(), ExternalActionError> {
        self.record(format!("unban {}", player))
    }

    fn deop(&self, player: &str) -> Result<(), ExternalActionError> {
        self.record(format!("deop {}", player))
    }
}

#[derive(Debug, Default)]
pub struct RecordingEffects {
    calls: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingEffects {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Make every following action fail.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: String) -> Result<(), ExternalActionError> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(ExternalActionError::failed("module action", "refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ModuleEffects for RecordingEffects {
    async fn remove_account_date_ineligible(
        &self,
        minimum_days: u32,
    ) -> Result<usize, ExternalActionError> {
        self.record(format!("remove_account_date_ineligible {}", minimum_days))?;
        Ok(0)
    }

    async fn remove_elo_ineligible(
        &self,
        limits: EloLimitOptions,
    ) -> Result<usize, ExternalActionError> {
        self.record(format!(
            "remove_elo_ineligible {}..{:?}",
            limits.minimum_required_elo, limits.maximum_required_elo
        ))?;
        Ok(0)
    }

    async fn connect_irc(&self, options: IrcOptions) -> Result<(), ExternalActionError> {
        self.record(format!("connect_irc {}", options.channel))
    }

    async fn disconnect_irc(&self) -> Result<(), ExternalActionError> {
        self.record("disconnect_irc".to_string())
    }

    async fn start_motd(&self, options: MotdOptions) -> Result<(), ExternalActionError> {
        self.record(format!("start_motd {}", options.repeat_interval_minutes))
    }

    async fn stop_motd(&self) -> Result<(), ExternalActionError> {
        self.record("stop_motd".to_string())
    }

    async fn reset_pickup(&self) -> Result<(), ExternalActionError> {
        self.record("reset_pickup".to_string())
    }

    async fn unlock_lobby(&self) -> Result<(), ExternalActionError> {
        self.record("unlock_lobby".to_string())
    }
}

/// A controller wired to a temporary data directory and recording fakes.
///
/// Must be built inside a tokio runtime.
pub struct Harness {
    pub controller: SettingsController,
    pub config: Arc<ConfigManager>,
    pub state: StateManager,
    pub session: Arc<RecordingSession>,
    pub effects: Arc<RecordingEffects>,
    pub stores: ListStores,
    pub metrics: Arc<Metrics>,
    _temp_dir: TempDir,
}

impl Harness {
    /// Controller over `doc` (written to disk first) with a stopped session.
    pub fn new(doc: &ConfigurationDocument) -> Self {
        Self::with_session(doc, RecordingSession::default())
    }

    pub fn with_session(doc: &ConfigurationDocument, session: RecordingSession) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let config = Arc::new(ConfigManager::new(&data_dir).unwrap());
        config.write(doc).unwrap();

        let state = StateManager::with_state(ModuleRuntimeState::from_document(doc));
        let session = Arc::new(session);
        let effects = Arc::new(RecordingEffects::default());
        let stores = ListStores::default();
        let metrics = Arc::new(Metrics::new());

        let collaborators = Collaborators {
            session: Arc::clone(&session) as Arc<dyn MonitoringSession>,
            effects: Arc::clone(&effects) as Arc<dyn ModuleEffects>,
            stores: stores.clone(),
        };
        let controller = SettingsController::new(
            Arc::clone(&config),
            state.clone(),
            collaborators,
            tokio::runtime::Handle::current(),
            Arc::clone(&metrics),
        );

        Self {
            controller,
            config,
            state,
            session,
            effects,
            stores,
            metrics,
            _temp_dir: temp_dir,
        }
    }

    pub fn stored(&self) -> ConfigurationDocument {
        self.config.read().unwrap()
    }

    pub fn file_contents(&self) -> String {
        std::fs::read_to_string(self.config.config_path()).unwrap()
    }
}

/// Default document with the owner and account names filled in.
pub fn configured_document() -> ConfigurationDocument {
    let mut doc = ConfigurationDocument::default();
    doc.core.owner_name = "klesk".to_string();
    doc.core.account_name = "klesk_bot".to_string();
    doc
}
