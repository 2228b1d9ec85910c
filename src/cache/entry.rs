//! Cache Entry Module
//!
//! Defines the immutable record stored for each key.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload together with the instant it was inserted.
///
/// Entries are never mutated in place: an overwrite replaces the whole entry,
/// so `created_at` always reflects the most recent `put` for the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Raw payload, returned verbatim on reads
    pub value: Vec<u8>,
    /// Insertion instant (monotonic clock)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn with_created_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long ago the entry was inserted, relative to `now`.
    ///
    /// Saturates to zero if `now` is earlier than `created_at`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `interval` as of `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `interval` is
    /// expired. Equivalent to `created_at <= now - interval`.
    pub fn is_expired_at(&self, now: Instant, interval: Duration) -> bool {
        self.age(now) >= interval
    }
}
