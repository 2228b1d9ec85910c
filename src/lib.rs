//! reapcache - A time-expiring byte cache
//!
//! Stores opaque byte payloads keyed by string. A background reaper evicts
//! entries once they are at least one interval old; reads return whatever the
//! reaper has not swept yet.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ExpiringCache;
pub use config::Config;
pub use error::{CacheError, Result};
