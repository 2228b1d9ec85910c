//! Request DTOs for the cache HTTP API
//!
//! Keys travel in the query string so that any string, including the empty
//! string and strings containing `/`, can be addressed.

use serde::Deserialize;

/// Query string for `GET /cache` and `PUT /cache`
///
/// # Fields
/// - `key`: The cache key. May be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    /// The cache key
    pub key: String,
}
