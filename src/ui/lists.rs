//! Rebuilds the four live list controls from their backing stores.

use crate::metrics::Metrics;
use crate::models::{AutoVote, BanInfo, EarlyQuitter, ListEntry, ListKind, User};
use crate::services::{BanStore, EntryStore, InMemoryStore, QuitStore};
use crate::ui::view::{ListControl, ViewState};
use std::sync::Arc;

/// The backing stores of the live lists, shared with the host.
#[derive(Clone)]
pub struct ListStores {
    pub bans: Arc<dyn BanStore>,
    pub quitters: Arc<dyn QuitStore>,
    pub votes: Arc<dyn EntryStore<AutoVote>>,
    pub users: Arc<dyn EntryStore<User>>,
}

pub struct ListDataRefresher {
    stores: ListStores,
    metrics: Arc<Metrics>,
}

impl ListDataRefresher {
    pub fn new(stores: ListStores, metrics: Arc<Metrics>) -> Self {
        Self { stores, metrics }
    }

    pub fn stores(&self) -> &ListStores {
        &self.stores
    }

    /// Rebuild the control for `kind` from a fresh snapshot of its store.
    pub fn refresh(&self, view: &mut ViewState, kind: ListKind) {
        match kind {
            ListKind::Bans => self.rebind(&mut view.bans, self.stores.bans.get_all()),
            ListKind::Quitters => self.rebind(&mut view.quitters, self.stores.quitters.get_all()),
            ListKind::Votes => self.rebind(&mut view.votes, self.stores.votes.get_all()),
            ListKind::Users => self.rebind(&mut view.users, self.stores.users.get_all()),
        }
    }

    pub fn refresh_all(&self, view: &mut ViewState) {
        for kind in [
            ListKind::Bans,
            ListKind::Quitters,
            ListKind::Votes,
            ListKind::Users,
        ] {
            self.refresh(view, kind);
        }
    }

    // The data source must be cleared before the new snapshot goes in: the
    // old selection may point past the end of the new collection.
    fn rebind<T: ListEntry>(&self, control: &mut ListControl<T>, entries: Vec<T>) {
        control.detach();
        if !entries.is_empty() {
            let count = entries.len();
            if let Err(e) = control.attach(entries) {
                tracing::error!("Failed to bind {}: {}", T::KIND, e);
                control.detach();
            } else {
                tracing::debug!("Bound {} entries to the {}", count, T::KIND);
            }
        } else {
            tracing::debug!("The {} is empty", T::KIND);
        }
        self.metrics.record_list_refresh();
    }
}

/// Empty in-memory stores.
impl Default for ListStores {
    fn default() -> Self {
        Self {
            bans: Arc::new(InMemoryStore::<BanInfo>::new()),
            quitters: Arc::new(InMemoryStore::<EarlyQuitter>::new()),
            votes: Arc::new(InMemoryStore::<AutoVote>::new()),
            users: Arc::new(InMemoryStore::<User>::new()),
        }
    }
}
