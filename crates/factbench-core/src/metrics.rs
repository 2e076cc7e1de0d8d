//! Global atomic counters for factbench observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of a run).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters — no allocations, no locking.
pub struct Metrics {
    tasks_scored: AtomicU64,
    runs_completed: AtomicU64,
    runs_registered: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            tasks_scored: AtomicU64::new(0),
            runs_completed: AtomicU64::new(0),
            runs_registered: AtomicU64::new(0),
        }
    }

    /// Increment the tasks-scored counter by one.
    pub fn inc_tasks_scored(&self) {
        self.tasks_scored.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the runs-completed counter by one.
    pub fn inc_runs_completed(&self) {
        self.runs_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the runs-registered counter by one.
    pub fn inc_runs_registered(&self) {
        self.runs_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Emit all current counter values as a single `info!` event.
    ///
    /// Call this at natural boundaries (end of a run, end of a batch)
    /// rather than on every increment.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            tasks_scored = self.tasks_scored(),
            runs_completed = self.runs_completed(),
            runs_registered = self.runs_registered(),
        );
    }

    /// Read the current tasks-scored count.
    pub fn tasks_scored(&self) -> u64 {
        self.tasks_scored.load(Ordering::Relaxed)
    }

    /// Read the current runs-completed count.
    pub fn runs_completed(&self) -> u64 {
        self.runs_completed.load(Ordering::Relaxed)
    }

    /// Read the current runs-registered count.
    pub fn runs_registered(&self) -> u64 {
        self.runs_registered.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.tasks_scored.store(0, Ordering::Relaxed);
        self.runs_completed.store(0, Ordering::Relaxed);
        self.runs_registered.store(0, Ordering::Relaxed);
    }
}
