//! Configuration Module
//!
//! Handles loading and validating configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_INTERVAL_MS;
use crate::error::{CacheError, Result};

/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default maximum PUT body size (1 MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Entry TTL and reaper period in milliseconds
    pub interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_MS` - Entry TTL and sweep period (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_BODY_BYTES` - Maximum PUT body size (default: 1048576)
    pub fn from_env() -> Self {
        Self {
            interval_ms: env_or("CACHE_INTERVAL_MS", DEFAULT_INTERVAL_MS),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            max_body_bytes: env_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        }
    }

    /// Rejects values the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "MAX_BODY_BYTES must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the cache interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            server_port: DEFAULT_SERVER_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
