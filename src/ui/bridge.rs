// UiBridge - Marshals work from background activity onto the UI-owning thread
//
// Everything that touches the view, the configuration document or the live
// module state runs on one thread. Background code (monitoring events, IRC
// events, timers, tokio tasks) never calls into the controller directly; it
// posts a UiMessage, and the owner thread drains the queue with
// SettingsController::pump().
//
// The bridge provides:
// - A bounded queue of UiMessage values (post from any thread)
// - A forwarder that turns StateChange events into repopulate requests

use crate::metrics::Metrics;
use crate::models::{ListKind, SettingsGroup};
use crate::state::{StateChange, StateManager};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

/// Queue capacity. Requests beyond this are dropped with a warning.
pub const UI_QUEUE_CAPACITY: usize = 100;

/// A request for the UI-owning thread.
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    /// Re-read the configuration and repopulate one tab.
    PopulateGroup(SettingsGroup),

    /// Repopulate every tab and list.
    PopulateAll,

    /// Rebuild one list from its store, e.g. after an in-game `!forgive`.
    RefreshList(ListKind),

    /// Show an informational dialog.
    Notify { title: String, message: String },
}

/// Owner side of the queue. Lives with the controller on the UI thread.
///
/// # Example
/// ```ignore
/// let bridge = UiBridge::new(metrics);
/// let handle = bridge.clone_handle();
///
/// // From a monitoring event handler on another thread
/// handle.post(UiMessage::RefreshList(ListKind::Bans));
///
/// // On the UI thread
/// controller.pump();
/// ```
pub struct UiBridge {
    /// Receiving end, drained only on the owner thread
    rx: mpsc::Receiver<UiMessage>,

    handle: UiBridgeHandle,
}

impl UiBridge {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        // Bounded to keep a stalled UI from growing the queue without limit
        let (tx, rx) = mpsc::channel(UI_QUEUE_CAPACITY);
        Self {
            rx,
            handle: UiBridgeHandle { tx, metrics },
        }
    }

    /// Clone a handle for background code to post through.
    pub fn clone_handle(&self) -> UiBridgeHandle {
        self.handle.clone()
    }

    /// Take the next queued message without blocking.
    pub fn try_next(&mut self) -> Option<UiMessage> {
        self.rx.try_recv().ok()
    }

    /// Take every message queued right now.
    pub fn drain(&mut self) -> Vec<UiMessage> {
        let mut messages = Vec::new();
        while let Some(message) = self.try_next() {
            messages.push(message);
        }
        messages
    }

    /// Forward live state changes into the queue as repopulate requests.
    ///
    /// Spawns a thread that lives until the state broadcast closes or the
    /// queue's owner goes away.
    pub fn forward_state_changes(&self, state: &StateManager) -> std::thread::JoinHandle<()> {
        let handle = self.clone_handle();
        let mut rx = state.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("State forwarder thread started");

            loop {
                let message = match rx.blocking_recv() {
                    Ok(change) => {
                        tracing::trace!("State change received: {:?}", change);
                        match change {
                            StateChange::ModuleToggled { module, .. }
                            | StateChange::ModuleSettingsChanged { module } => {
                                UiMessage::PopulateGroup(SettingsGroup::Module(module))
                            }
                            StateChange::StateReset => UiMessage::PopulateAll,
                        }
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("State broadcast channel closed - stopping forwarder");
                        break;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "State forwarder lagged - {} events skipped, repopulating everything",
                            skipped
                        );
                        UiMessage::PopulateAll
                    }
                };

                if !handle.post(message) && handle.is_closed() {
                    break;
                }
            }

            tracing::debug!("State forwarder thread terminated");
        })
    }
}

/// Cloneable sending side of the queue.
#[derive(Clone)]
pub struct UiBridgeHandle {
    tx: mpsc::Sender<UiMessage>,
    metrics: Arc<Metrics>,
}

impl UiBridgeHandle {
    /// Queue `message` for the owner thread. Returns false if it was dropped.
    pub fn post(&self, message: UiMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(_) => true,
            Err(mpsc::error::TrySendError::Full(message)) => {
                tracing::warn!("UI queue full - dropping {:?}", message);
                self.metrics.record_ui_channel_full();
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Failed to post UI message - the UI has shut down");
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
