//! Module activation: flips a module's live flag and runs its entry or exit
//! action.
//!
//! The same rules apply no matter who asks (a settings save, a restore to
//! defaults, the start of monitoring):
//!
//! - Flag-only modules (accuracy, auto-voter, early quit, server list) just
//!   have their flag set and the transition logged.
//! - Other modules run their action only while the host is monitoring a
//!   server. Otherwise the flag is set and the transition is remembered
//!   until [`ActivationController::apply_deferred`] runs at the next
//!   monitoring start, exit actions included.
//! - Actions run as tokio tasks. A failed action is logged and counted; the
//!   flag change it followed is never rolled back.

use crate::metrics::Metrics;
use crate::models::{EloLimitOptions, IrcOptions, ModuleKind, ModuleRuntimeState, MotdOptions};
use crate::services::{ExternalActionError, ModuleEffects, MonitoringSession};
use crate::state::StateManager;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// An entry or exit action, carrying the settings it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RemoveAccountDateIneligible { minimum_days: u32 },
    RemoveEloIneligible(EloLimitOptions),
    ConnectIrc(IrcOptions),
    DisconnectIrc,
    StartMotd(MotdOptions),
    StopMotd,
    ResetPickup,
}

impl Effect {
    /// Decide which action, if any, a transition of `module` calls for.
    ///
    /// Turning a limiter or the MOTD on re-runs its entry action even if it
    /// was already on, since the thresholds or interval may have changed.
    /// IRC only connects on an off-to-on transition. Exit actions only run on
    /// an on-to-off transition.
    pub fn plan(
        module: ModuleKind,
        was_active: bool,
        active: bool,
        state: &ModuleRuntimeState,
    ) -> Option<Effect> {
        if module.is_flag_only() {
            return None;
        }

        if active {
            match module {
                ModuleKind::AccountDate => Some(Effect::RemoveAccountDateIneligible {
                    minimum_days: state.account_date.minimum_days_required,
                }),
                ModuleKind::EloLimit => Some(Effect::RemoveEloIneligible(state.elo_limit.clone())),
                ModuleKind::Irc if !was_active => Some(Effect::ConnectIrc(state.irc.clone())),
                ModuleKind::Motd => Some(Effect::StartMotd(state.motd.clone())),
                _ => None,
            }
        } else if was_active {
            match module {
                ModuleKind::Irc => Some(Effect::DisconnectIrc),
                ModuleKind::Motd => Some(Effect::StopMotd),
                ModuleKind::Pickup => Some(Effect::ResetPickup),
                _ => None,
            }
        } else {
            None
        }
    }

    async fn run(self, effects: &dyn ModuleEffects) -> Result<(), ExternalActionError> {
        match self {
            Effect::RemoveAccountDateIneligible { minimum_days } => {
                let removed = effects.remove_account_date_ineligible(minimum_days).await?;
                tracing::info!(
                    "Removed {} players with accounts younger than {} days",
                    removed,
                    minimum_days
                );
            }
            Effect::RemoveEloIneligible(limits) => {
                let removed = effects.remove_elo_ineligible(limits).await?;
                tracing::info!("Removed {} players outside the Elo limits", removed);
            }
            Effect::ConnectIrc(options) => effects.connect_irc(options).await?,
            Effect::DisconnectIrc => effects.disconnect_irc().await?,
            Effect::StartMotd(options) => effects.start_motd(options).await?,
            Effect::StopMotd => effects.stop_motd().await?,
            Effect::ResetPickup => {
                effects.reset_pickup().await?;
                effects.unlock_lobby().await?;
            }
        }
        Ok(())
    }
}

/// What [`ActivationController::activate`] did.
#[derive(Debug)]
pub enum ActivationOutcome {
    /// Only the flag was set; the module has no actions.
    FlagOnly,
    /// Flag set; the action waits for monitoring to start.
    Deferred,
    /// Flag set; the transition needs no action.
    NoAction,
    /// Flag set and an action task started.
    Started(JoinHandle<()>),
}

impl ActivationOutcome {
    /// Wait for a started action to finish; returns immediately otherwise.
    pub async fn finished(self) {
        if let ActivationOutcome::Started(handle) = self {
            if let Err(e) = handle.await {
                tracing::error!("Activation task panicked: {}", e);
            }
        }
    }

    pub fn started(&self) -> bool {
        matches!(self, ActivationOutcome::Started(_))
    }
}

/// Removes a module from the in-flight set when its task ends, however it ends.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<ModuleKind>>>,
    module: ModuleKind,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&self.module);
        }
    }
}

pub struct ActivationController {
    state: StateManager,
    session: Arc<dyn MonitoringSession>,
    effects: Arc<dyn ModuleEffects>,
    runtime: tokio::runtime::Handle,
    metrics: Arc<Metrics>,
    in_flight: Arc<Mutex<HashSet<ModuleKind>>>,
    /// Modules toggled while stopped, with their flag before the first toggle
    deferred: Mutex<HashMap<ModuleKind, bool>>,
}

impl ActivationController {
    pub fn new(
        state: StateManager,
        session: Arc<dyn MonitoringSession>,
        effects: Arc<dyn ModuleEffects>,
        runtime: tokio::runtime::Handle,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            state,
            session,
            effects,
            runtime,
            metrics,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            deferred: Mutex::new(HashMap::new()),
        }
    }

    /// Set `module`'s live flag to `active` and apply its action.
    pub fn activate(&self, module: ModuleKind, active: bool) -> ActivationOutcome {
        let was_active = self.state.read(|s| s.is_active(module));
        self.state.set_active(module, active);

        if was_active != active {
            tracing::info!(
                "Module {} {}",
                module,
                if active { "activated" } else { "deactivated" }
            );
        } else {
            tracing::debug!("Module {} remains {}", module, if active { "on" } else { "off" });
        }

        if module.is_flag_only() {
            return ActivationOutcome::FlagOnly;
        }

        if !self.session.is_monitoring() {
            tracing::debug!("Not monitoring; {} action deferred", module);
            if let Ok(mut deferred) = self.deferred.lock() {
                deferred.entry(module).or_insert(was_active);
            }
            return ActivationOutcome::Deferred;
        }

        let effect = self
            .state
            .read(|s| Effect::plan(module, was_active, active, s));
        match effect {
            Some(effect) => ActivationOutcome::Started(self.spawn(module, effect)),
            None => ActivationOutcome::NoAction,
        }
    }

    /// Catch up on the actions deferred while monitoring was stopped.
    ///
    /// Modules toggled while stopped run the action for their net transition,
    /// so one switched off gets its exit action. Active modules that were not
    /// touched run their entry action.
    pub fn apply_deferred(&self) -> Vec<JoinHandle<()>> {
        let deferred = self
            .deferred
            .lock()
            .map(|mut deferred| std::mem::take(&mut *deferred))
            .unwrap_or_default();
        let snapshot = self.state.snapshot();

        ModuleKind::ALL
            .into_iter()
            .filter(|module| !self.is_pending(*module))
            .filter_map(|module| {
                let was_active = deferred.get(&module).copied().unwrap_or(false);
                Effect::plan(module, was_active, snapshot.is_active(module), &snapshot)
                    .map(|effect| self.spawn(module, effect))
            })
            .collect()
    }

    /// Whether an action for `module` is still running.
    pub fn is_pending(&self, module: ModuleKind) -> bool {
        self.in_flight
            .lock()
            .map(|set| set.contains(&module))
            .unwrap_or(false)
    }

    fn spawn(&self, module: ModuleKind, effect: Effect) -> JoinHandle<()> {
        if let Ok(mut set) = self.in_flight.lock() {
            set.insert(module);
        }
        let guard = InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            module,
        };

        let effects = Arc::clone(&self.effects);
        let metrics = Arc::clone(&self.metrics);
        metrics.record_side_effect_started();
        tracing::debug!("Starting {} action: {:?}", module, effect);

        self.runtime.spawn(async move {
            let _guard = guard;
            if let Err(e) = effect.run(effects.as_ref()).await {
                tracing::warn!("Module {} action failed: {}", module, e);
                metrics.record_side_effect_failed();
            }
        })
    }
}
