//! Cache Store Module
//!
//! Synchronous entry map. Locking is the caller's job: `ExpiringCache` keeps
//! the store behind a `RwLock` shared with the reaper task.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key to entry map with insertion timestamps.
///
/// The store never checks age on reads. Expiry is applied only by
/// [`CacheStore::reap`], which the background reaper calls once per tick.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The replacement carries a fresh timestamp, so overwriting a key resets
    /// its age to zero.
    pub fn put(&mut self, key: String, value: Vec<u8>) {
        self.put_at(key, value, Instant::now());
    }

    /// Stores `value` under `key` with an explicit creation instant.
    pub fn put_at(&mut self, key: String, value: Vec<u8>, created_at: Instant) {
        self.entries
            .insert(key, CacheEntry::with_created_at(value, created_at));
    }

    // == Get ==
    /// Returns the entry for `key` if the reaper has not removed it.
    ///
    /// A logically stale entry that has not been swept yet is still returned.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Reap ==
    /// Removes every entry whose age is at least `interval` as of `now`.
    ///
    /// All entries are judged against the same `now`. Deletion happens in
    /// place while the caller holds exclusive access, so a concurrent `put`
    /// can only land entirely before or entirely after the sweep.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, now: Instant, interval: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired_at(now, interval));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, swept or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
