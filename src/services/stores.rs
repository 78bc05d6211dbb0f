use crate::models::{BanInfo, EarlyQuitter, ListEntry};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::RwLock;

/// Backing store of one live list.
///
/// Keys compare case-insensitively, matching how player names are compared
/// in game. Stores are shared with the host, which may change them at any
/// time, so every method takes `&self`.
pub trait EntryStore<E: ListEntry>: Send + Sync {
    /// Snapshot of every entry, in insertion order.
    fn get_all(&self) -> Vec<E>;

    /// Insert `entry`; returns false and leaves the store unchanged if its key
    /// is already present.
    fn add(&self, entry: E) -> bool;

    /// Remove the entry with `key`, returning it if it was present.
    fn remove(&self, key: &str) -> Option<E>;

    fn exists(&self, key: &str) -> bool;

    /// Remove every entry, returning how many there were.
    fn clear(&self) -> usize;

    fn len(&self) -> usize {
        self.get_all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ban list with the expiration sweep.
pub trait BanStore: EntryStore<BanInfo> {
    /// Remove every ban that has expired at `now`, returning the removed bans.
    fn remove_expired(&self, now: DateTime<Utc>) -> Vec<BanInfo>;
}

/// Early quitter list with forgiveness.
pub trait QuitStore: EntryStore<EarlyQuitter> {
    /// Lower a player's quit count by `n`, removing the entry at zero.
    ///
    /// Returns the remaining count, or `None` if the player was not listed.
    fn decrement_count(&self, key: &str, n: u32) -> Option<u32>;
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Store that keeps its entries in memory.
#[derive(Debug)]
pub struct InMemoryStore<E> {
    entries: RwLock<IndexMap<String, E>>,
}

impl<E: ListEntry> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Build a store already holding `entries`; later duplicates are dropped.
    pub fn with_entries(entries: impl IntoIterator<Item = E>) -> Self {
        let store = Self::new();
        for entry in entries {
            store.add(entry);
        }
        store
    }
}

impl<E: ListEntry> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ListEntry> EntryStore<E> for InMemoryStore<E> {
    fn get_all(&self) -> Vec<E> {
        self.entries.read().unwrap().values().cloned().collect()
    }

    fn add(&self, entry: E) -> bool {
        let key = normalize(entry.key());
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, entry);
        true
    }

    fn remove(&self, key: &str) -> Option<E> {
        self.entries.write().unwrap().shift_remove(&normalize(key))
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.read().unwrap().contains_key(&normalize(key))
    }

    fn clear(&self) -> usize {
        let mut entries = self.entries.write().unwrap();
        let count = entries.len();
        entries.clear();
        count
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl BanStore for InMemoryStore<BanInfo> {
    fn remove_expired(&self, now: DateTime<Utc>) -> Vec<BanInfo> {
        let mut entries = self.entries.write().unwrap();
        let mut expired = Vec::new();
        entries.retain(|_, ban| {
            if ban.is_expired(now) {
                expired.push(ban.clone());
                false
            } else {
                true
            }
        });
        expired
    }
}

impl QuitStore for InMemoryStore<EarlyQuitter> {
    fn decrement_count(&self, key: &str, n: u32) -> Option<u32> {
        let key = normalize(key);
        let mut entries = self.entries.write().unwrap();
        let remaining = {
            let quitter = entries.get_mut(&key)?;
            quitter.quit_count = quitter.quit_count.saturating_sub(n);
            quitter.quit_count
        };
        if remaining == 0 {
            entries.shift_remove(&key);
        }
        Some(remaining)
    }
}
