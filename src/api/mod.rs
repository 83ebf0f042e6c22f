//! API Module
//!
//! HTTP handlers and routing for the cache gateway REST API.
//!
//! # Endpoints
//! - `POST /api/v1/cache/set` - Store a key-value pair
//! - `GET /api/v1/cache/get` - Retrieve a value by key
//! - `GET /api/v1/cache/stats` - Hit/miss statistics
//! - `DELETE /api/v1/cache/cleardatabase` - Flush the store (admin)
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, API_PREFIX};
