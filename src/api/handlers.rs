//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{ExpiringCache, StatsSnapshot};
use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, KeyQuery, PutResponse};

/// Application state shared across all handlers.
///
/// Owns the process's single cache instance. `main` keeps a clone of the
/// `Arc` so it can shut the reaper down after the server stops.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache
    pub cache: Arc<ExpiringCache>,
    /// Maximum accepted PUT body size in bytes
    pub max_body_bytes: usize,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: ExpiringCache) -> Self {
        Self {
            cache: Arc::new(cache),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Validates the configuration and builds the cache it describes.
    ///
    /// Starts the cache reaper, so this must run inside a tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let cache = ExpiringCache::new(config.interval())?;
        Ok(Self {
            cache: Arc::new(cache),
            max_body_bytes: config.max_body_bytes,
        })
    }
}

fn key_from(query: std::result::Result<Query<KeyQuery>, QueryRejection>) -> Result<String> {
    query
        .map(|Query(q)| q.key)
        .map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))
}

/// Handler for GET /cache?key=<k>
///
/// Returns the stored bytes verbatim as `application/octet-stream`.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Response> {
    let key = key_from(query)?;

    match state.cache.get(&key).await {
        Some(value) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            value,
        )
            .into_response()),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for PUT /cache?key=<k>
///
/// Stores the raw request body, replacing any previous value.
pub async fn put_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<PutResponse>> {
    let key = key_from(query)?;
    let size = body.len();

    state.cache.put(key.clone(), body.to_vec()).await;

    Ok(Json(PutResponse::new(key, size)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
///
/// Reports "degraded" once the reaper has stopped, since entries no longer
/// expire from then on.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    if state.cache.reaper_running() {
        Json(HealthResponse::healthy())
    } else {
        Json(HealthResponse::degraded())
    }
}
