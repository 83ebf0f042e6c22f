//! API Routes
//!
//! Configures the Axum router with all cache gateway endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_database_handler, get_handler, health_handler, set_handler, stats_handler, AppState,
};

/// Path prefix shared by the cache endpoints.
pub const API_PREFIX: &str = "/api/v1/cache";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/v1/cache/set?key=&value=` - Store a key-value pair
/// - `GET /api/v1/cache/get?key=` - Retrieve a value by key
/// - `GET /api/v1/cache/stats` - Hit/miss counters and ratio
/// - `DELETE /api/v1/cache/cleardatabase?secret=` - Flush the store
/// - `GET /health` - Store reachability
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cache_routes = Router::new()
        .route("/set", post(set_handler))
        .route("/get", get(get_handler))
        .route("/stats", get(stats_handler))
        .route("/cleardatabase", delete(clear_database_handler));

    Router::new()
        .nest(API_PREFIX, cache_routes)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
