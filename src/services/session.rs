use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Failure of a best-effort action against the live server or a module.
///
/// These are logged and counted, never shown as blocking errors: the local
/// state change that triggered them has already been committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalActionError {
    #[error("not monitoring a server")]
    NotMonitoring,

    #[error("{action} failed: {reason}")]
    Failed { action: &'static str, reason: String },
}

impl ExternalActionError {
    pub fn failed(action: &'static str, reason: impl Into<String>) -> Self {
        ExternalActionError::Failed {
            action,
            reason: reason.into(),
        }
    }
}

/// The host's connection to a live Quake Live server.
///
/// Commands are issued opportunistically: the settings core only sends them
/// while [`is_monitoring`](Self::is_monitoring) is true and ignores failures
/// beyond logging them.
#[cfg_attr(test, mockall::automock)]
pub trait MonitoringSession: Send + Sync {
    fn is_monitoring(&self) -> bool;

    fn begin_monitoring(&self) -> Result<(), ExternalActionError>;

    fn stop_monitoring(&self) -> Result<(), ExternalActionError>;

    /// Kick a player and add them to the server's ban list.
    fn kick_ban(&self, player: &str) -> Result<(), ExternalActionError>;

    fn unban(&self, player: &str) -> Result<(), ExternalActionError>;

    /// Remove a player's operator status on the server.
    fn deop(&self, player: &str) -> Result<(), ExternalActionError>;
}

/// Session used when no server connection is available.
///
/// Tracks the monitoring flag so the settings flow behaves normally, and
/// reports every live command as [`ExternalActionError::NotMonitoring`] while
/// stopped.
#[derive(Debug, Default)]
pub struct OfflineSession {
    monitoring: AtomicBool,
}

impl OfflineSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn live_command(&self, action: &'static str, player: &str) -> Result<(), ExternalActionError> {
        if !self.is_monitoring() {
            return Err(ExternalActionError::NotMonitoring);
        }
        tracing::info!("{} {} (offline session, nothing sent)", action, player);
        Ok(())
    }
}

impl MonitoringSession for OfflineSession {
    fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    fn begin_monitoring(&self) -> Result<(), ExternalActionError> {
        self.monitoring.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_monitoring(&self) -> Result<(), ExternalActionError> {
        self.monitoring.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn kick_ban(&self, player: &str) -> Result<(), ExternalActionError> {
        self.live_command("kickban", player)
    }

    fn unban(&self, player: &str) -> Result<(), ExternalActionError> {
        self.live_command("unban", player)
    }

    fn deop(&self, player: &str) -> Result<(), ExternalActionError> {
        self.live_command("deop", player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_session_tracks_monitoring() {
        let session = OfflineSession::new();
        assert!(!session.is_monitoring());
        assert_eq!(
            session.kick_ban("sarge"),
            Err(ExternalActionError::NotMonitoring)
        );

        session.begin_monitoring().unwrap();
        assert!(session.is_monitoring());
        assert!(session.kick_ban("sarge").is_ok());

        session.stop_monitoring().unwrap();
        assert!(!session.is_monitoring());
    }

    #[test]
    fn test_error_display() {
        let err = ExternalActionError::failed("deop", "rcon timeout");
        assert_eq!(err.to_string(), "deop failed: rcon timeout");
    }
}
