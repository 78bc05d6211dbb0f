// Sync metrics module
//
// Lightweight counters for how the settings window is being used

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Settings window metrics
///
/// Uses atomic operations so background tasks (activation side effects, the
/// UI bridge) can record without locks. Logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Saves that passed validation and were written
    pub saves_committed: AtomicU64,

    /// Saves rejected by validation or a cross-field rule
    pub saves_rejected: AtomicU64,

    /// Activation side effects started
    pub side_effects_started: AtomicU64,

    /// Activation side effects or live commands that failed
    pub side_effects_failed: AtomicU64,

    /// List controls rebuilt
    pub list_refreshes: AtomicU64,

    /// UI messages run on the owner thread
    pub ui_messages: AtomicU64,

    /// UI messages dropped because the queue was full
    pub ui_channel_full: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            saves_committed: AtomicU64::new(0),
            saves_rejected: AtomicU64::new(0),
            side_effects_started: AtomicU64::new(0),
            side_effects_failed: AtomicU64::new(0),
            list_refreshes: AtomicU64::new(0),
            ui_messages: AtomicU64::new(0),
            ui_channel_full: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_save_committed(&self) {
        self.saves_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save_rejected(&self) {
        self.saves_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_side_effect_started(&self) {
        self.side_effects_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_side_effect_failed(&self) {
        self.side_effects_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_list_refresh(&self) {
        self.list_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_message(&self) {
        self.ui_messages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_channel_full(&self) {
        self.ui_channel_full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Fraction of save attempts that were rejected, 0.0 when nothing was saved.
    pub fn rejection_rate(&self) -> f64 {
        let rejected = self.saves_rejected.load(Ordering::Relaxed);
        let total = rejected + self.saves_committed.load(Ordering::Relaxed);
        if total > 0 {
            rejected as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Settings Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Saves: {} committed, {} rejected ({:.0}% rejected)",
            self.saves_committed.load(Ordering::Relaxed),
            self.saves_rejected.load(Ordering::Relaxed),
            self.rejection_rate() * 100.0
        );
        tracing::info!(
            "Side effects: {} started, {} failed",
            self.side_effects_started.load(Ordering::Relaxed),
            self.side_effects_failed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "List refreshes: {}, UI messages: {}, channel full: {}",
            self.list_refreshes.load(Ordering::Relaxed),
            self.ui_messages.load(Ordering::Relaxed),
            self.ui_channel_full.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
