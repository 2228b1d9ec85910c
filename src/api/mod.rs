//! API Module
//!
//! HTTP handlers and routing over a shared [`ExpiringCache`](crate::cache::ExpiringCache).
//!
//! # Endpoints
//! - `GET /cache?key=<k>` - Read raw bytes stored under a key
//! - `PUT /cache?key=<k>` - Store the raw request body under a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
