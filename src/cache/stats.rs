//! Cache Statistics Module
//!
//! Tracks lookups and reaper activity.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Live counters shared by readers and the reaper.
///
/// Counters are atomic so that `get` can record hits and misses while only
/// holding the store's read lock.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sweeps: AtomicU64,
    expired: AtomicU64,
    last_sweep_at: Mutex<Option<DateTime<Utc>>>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Sweep ==
    /// Records one completed reaper pass that removed `expired` entries.
    pub fn record_sweep(&self, expired: usize) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.expired.fetch_add(expired as u64, Ordering::Relaxed);
        if let Ok(mut last) = self.last_sweep_at.lock() {
            *last = Some(Utc::now());
        }
    }

    // == Snapshot ==
    /// Copies the counters into a serializable snapshot.
    pub fn snapshot(&self, total_entries: usize) -> StatsSnapshot {
        let last_sweep_at = self.last_sweep_at.lock().ok().and_then(|last| *last);
        StatsSnapshot::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.sweeps.load(Ordering::Relaxed),
            self.expired.load(Ordering::Relaxed),
            total_entries,
            last_sweep_at,
        )
    }
}

// == Stats Snapshot ==
/// Point-in-time view of [`CacheStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Completed reaper passes
    pub sweeps: u64,
    /// Entries removed by the reaper
    pub expired: u64,
    /// Entries currently stored
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Wall-clock time of the most recent sweep
    pub last_sweep_at: Option<DateTime<Utc>>,
}

impl StatsSnapshot {
    /// Creates a snapshot and derives the hit rate.
    pub fn new(
        hits: u64,
        misses: u64,
        sweeps: u64,
        expired: u64,
        total_entries: usize,
        last_sweep_at: Option<DateTime<Utc>>,
    ) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        Self {
            hits,
            misses,
            sweeps,
            expired,
            total_entries,
            hit_rate,
            last_sweep_at,
        }
    }
}
