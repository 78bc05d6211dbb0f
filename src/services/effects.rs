use crate::models::{EloLimitOptions, IrcOptions, MotdOptions};
use crate::services::session::ExternalActionError;
use async_trait::async_trait;

/// Entry and exit actions of the modules that have any.
///
/// Implemented by the host's module objects. Calls may be network-bound, so
/// the activation controller runs them as tokio tasks and never awaits them on
/// the UI thread. Arguments are owned snapshots of the settings just saved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleEffects: Send + Sync {
    /// Kick every connected player whose account is younger than `minimum_days`.
    ///
    /// Returns how many players were removed.
    async fn remove_account_date_ineligible(
        &self,
        minimum_days: u32,
    ) -> Result<usize, ExternalActionError>;

    /// Kick every connected player outside the configured Elo range.
    async fn remove_elo_ineligible(
        &self,
        limits: EloLimitOptions,
    ) -> Result<usize, ExternalActionError>;

    async fn connect_irc(&self, options: IrcOptions) -> Result<(), ExternalActionError>;

    async fn disconnect_irc(&self) -> Result<(), ExternalActionError>;

    /// Start (or restart) the repeating message-of-the-day timer.
    async fn start_motd(&self, options: MotdOptions) -> Result<(), ExternalActionError>;

    async fn stop_motd(&self) -> Result<(), ExternalActionError>;

    /// Drop all pickup game state (queues, captains, teams).
    async fn reset_pickup(&self) -> Result<(), ExternalActionError>;

    /// Unlock the teams on the server once pickup management stops.
    async fn unlock_lobby(&self) -> Result<(), ExternalActionError>;
}

/// Effects for a host without live module objects: every action is logged
/// and reported as done.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEffects;

#[async_trait]
impl ModuleEffects for LoggingEffects {
    async fn remove_account_date_ineligible(
        &self,
        minimum_days: u32,
    ) -> Result<usize, ExternalActionError> {
        tracing::info!("Would remove players with accounts younger than {} days", minimum_days);
        Ok(0)
    }

    async fn remove_elo_ineligible(
        &self,
        limits: EloLimitOptions,
    ) -> Result<usize, ExternalActionError> {
        tracing::info!(
            "Would remove players outside {} Elo {}..{:?}",
            limits.game_type,
            limits.minimum_required_elo,
            limits.maximum_required_elo
        );
        Ok(0)
    }

    async fn connect_irc(&self, options: IrcOptions) -> Result<(), ExternalActionError> {
        tracing::info!(
            "Would connect to {}:{} as {}",
            options.server_address,
            options.server_port,
            options.bot_nick
        );
        Ok(())
    }

    async fn disconnect_irc(&self) -> Result<(), ExternalActionError> {
        tracing::info!("Would disconnect from IRC");
        Ok(())
    }

    async fn start_motd(&self, options: MotdOptions) -> Result<(), ExternalActionError> {
        tracing::info!(
            "Would repeat MOTD every {} minutes",
            options.repeat_interval_minutes
        );
        Ok(())
    }

    async fn stop_motd(&self) -> Result<(), ExternalActionError> {
        tracing::info!("Would stop MOTD timer");
        Ok(())
    }

    async fn reset_pickup(&self) -> Result<(), ExternalActionError> {
        tracing::info!("Would reset pickup state");
        Ok(())
    }

    async fn unlock_lobby(&self) -> Result<(), ExternalActionError> {
        tracing::info!("Would unlock teams");
        Ok(())
    }
}
