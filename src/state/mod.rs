// Live module state
//
// StateManager holds the ModuleRuntimeState the host's modules read, behind a
// RwLock, and broadcasts a StateChange for every difference an update makes.
// The settings window subscribes so it can follow changes it did not make.

use crate::models::{ModuleKind, ModuleRuntimeState};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Capacity of the change broadcast; slower receivers see `Lagged`.
const CHANGE_CHANNEL_CAPACITY: usize = 100;

/// What an update changed, one event per module and kind of change.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// A module's active flag flipped
    ModuleToggled { module: ModuleKind, active: bool },

    /// A module's tunables changed (anything other than the active flag)
    ModuleSettingsChanged { module: ModuleKind },

    /// All live state was replaced
    StateReset,
}

impl StateChange {
    /// The module this event concerns, if it concerns a single one.
    pub fn module(&self) -> Option<ModuleKind> {
        match self {
            StateChange::ModuleToggled { module, .. }
            | StateChange::ModuleSettingsChanged { module } => Some(*module),
            StateChange::StateReset => None,
        }
    }
}

/// Shared handle to the live module state.
///
/// The host creates one and hands clones to the settings controller and the
/// activation controller; all clones see the same state and the same
/// broadcast. Locks are held only inside [`read`](Self::read) and
/// [`update`](Self::update), never across a call out.
///
/// See also [`crate::ui::controller::SettingsController`], which pushes saved
/// settings in here.
pub struct StateManager {
    state: Arc<RwLock<ModuleRuntimeState>>,
    changes: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Every module off, every tunable at its default.
    pub fn new() -> Self {
        Self::with_state(ModuleRuntimeState::default())
    }

    pub fn with_state(state: ModuleRuntimeState) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(state)),
            changes,
        }
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> ModuleRuntimeState {
        self.read(ModuleRuntimeState::clone)
    }

    /// Run `f` under the read lock.
    ///
    /// # Example
    /// ```ignore
    /// let irc_on = state_manager.read(|state| state.irc.is_active);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ModuleRuntimeState) -> R,
    {
        let guard = self.state.read().unwrap();
        f(&guard)
    }

    /// Mutate the state under the write lock and broadcast what changed.
    ///
    /// Events come out in tab order; for one module a toggle precedes its
    /// settings change. Returns the events that were sent.
    pub fn update<F>(&self, mutate: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut ModuleRuntimeState),
    {
        let mut guard = self.state.write().unwrap();
        let before = guard.clone();

        mutate(&mut guard);

        let changes = Self::diff(&before, &guard);
        for change in &changes {
            // No subscribers is fine
            let _ = self.changes.send(change.clone());
        }

        changes
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    fn diff(before: &ModuleRuntimeState, after: &ModuleRuntimeState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        for module in ModuleKind::ALL {
            if before.same_section(after, module) {
                continue;
            }

            let active = after.is_active(module);
            if before.is_active(module) != active {
                changes.push(StateChange::ModuleToggled { module, active });
            }

            // With the flag equalized, any remaining difference is a tunable
            let mut flag_only = before.clone();
            flag_only.set_active(module, active);
            if !flag_only.same_section(after, module) {
                changes.push(StateChange::ModuleSettingsChanged { module });
            }
        }

        changes
    }

    pub fn set_active(&self, module: ModuleKind, active: bool) -> Vec<StateChange> {
        self.update(|state| state.set_active(module, active))
    }

    /// Swap in a whole new state, e.g. after the host reloads its modules.
    ///
    /// Subscribers get the per-module events followed by
    /// [`StateChange::StateReset`].
    pub fn replace(&self, new_state: ModuleRuntimeState) -> Vec<StateChange> {
        let mut changes = self.update(|state| *state = new_state);

        let _ = self.changes.send(StateChange::StateReset);
        changes.push(StateChange::StateReset);

        changes
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            changes: self.changes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_every_module_off() {
        assert!(StateManager::new().snapshot().active_modules().is_empty());
        assert!(StateManager::default().read(|s| s.active_modules().is_empty()));
    }

    #[test]
    fn test_toggle_emits_event() {
        let manager = StateManager::new();

        let changes = manager.set_active(ModuleKind::Irc, true);

        assert_eq!(
            changes,
            vec![StateChange::ModuleToggled {
                module: ModuleKind::Irc,
                active: true
            }]
        );
        assert!(manager.read(|s| s.irc.is_active));
    }

    #[test]
    fn test_tunable_change_is_not_a_toggle() {
        let manager = StateManager::new();

        let changes = manager.update(|state| {
            state.motd.repeat_interval_minutes = 10;
        });

        assert_eq!(
            changes,
            vec![StateChange::ModuleSettingsChanged {
                module: ModuleKind::Motd
            }]
        );
    }

    #[test]
    fn test_toggle_and_settings_in_one_update() {
        let manager = StateManager::new();

        let changes = manager.update(|state| {
            state.elo_limit.is_active = true;
            state.elo_limit.minimum_required_elo = 1200;
            state.pickup.team_size = 5;
        });

        assert_eq!(changes.len(), 3);
        assert!(matches!(
            changes[0],
            StateChange::ModuleToggled {
                module: ModuleKind::EloLimit,
                active: true
            }
        ));
        assert!(matches!(
            changes[1],
            StateChange::ModuleSettingsChanged {
                module: ModuleKind::EloLimit
            }
        ));
        assert_eq!(changes[2].module(), Some(ModuleKind::Pickup));
    }

    #[test]
    fn test_no_change_no_event() {
        let manager = StateManager::new();
        let changes = manager.update(|state| {
            state.irc.is_active = false;
        });
        assert!(changes.is_empty());
    }

    #[test]
    fn test_replace_emits_reset() {
        let manager = StateManager::new();
        let mut state = ModuleRuntimeState::default();
        state.accuracy.is_active = true;

        let changes = manager.replace(state);

        assert_eq!(changes.last(), Some(&StateChange::StateReset));
        assert!(manager.read(|s| s.accuracy.is_active));
    }

    #[test]
    fn test_subscriber_sees_toggle() {
        let pickup_state = StateManager::new();
        let mut rx = pickup_state.subscribe();

        pickup_state.set_active(ModuleKind::Pickup, true);

        assert!(matches!(
            rx.try_recv().unwrap(),
            StateChange::ModuleToggled {
                module: ModuleKind::Pickup,
                active: true
            }
        ));
    }

    #[test]
    fn test_clone_shares_state() {
        let host = StateManager::new();
        let controller_side = host.clone();

        host.set_active(ModuleKind::AutoVoter, true);

        assert!(controller_side.snapshot().auto_voter.is_active);
    }
}
