//! Cache Module
//!
//! Time-expiring byte cache. Entries are evicted by a background reaper once
//! they are at least one interval old; reads never check age.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::ExpiringCache;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;

// == Public Constants ==
/// Interval used when none is configured (10 seconds)
pub const DEFAULT_INTERVAL_MS: u64 = 10_000;
