//! API Handlers
//!
//! HTTP request handlers for each cache gateway endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::CacheGateway;
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, KeyParams, SecretParams, SetParams,
    StatsResponse, StatusResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the key-value store
    pub gateway: CacheGateway,
}

impl AppState {
    /// Creates a new AppState around a ready gateway.
    pub fn new(gateway: CacheGateway) -> Self {
        Self { gateway }
    }
}

/// Handler for POST /api/v1/cache/set
///
/// Stores `value` under `key`, overwriting any previous value.
pub async fn set_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<SetParams>, QueryRejection>,
) -> Result<Json<StatusResponse>> {
    let Query(params) = params.map_err(bad_query)?;
    let key = params.key.unwrap_or_default();
    let value = params.value.unwrap_or_default();

    state.gateway.set(&key, &value).await?;

    Ok(Json(StatusResponse::success()))
}

/// Handler for GET /api/v1/cache/get
///
/// Returns the stored value, or null when the key is absent. An undecodable
/// query is answered like a blank key.
pub async fn get_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<KeyParams>, QueryRejection>,
) -> Result<Json<GetResponse>> {
    let Query(params) = params.map_err(|rejection| {
        debug!("Rejected get query: {}", rejection.body_text());
        ApiError::InvalidGetKey
    })?;
    let key = params.key.unwrap_or_default();
    let value = state.gateway.get(&key).await?;

    Ok(Json(GetResponse::new(value)))
}

/// Handler for GET /api/v1/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let snapshot = state.gateway.stats().await?;

    Ok(Json(StatsResponse::from(snapshot)))
}

/// Handler for DELETE /api/v1/cache/cleardatabase
///
/// Flushes the whole store when `secret` matches the admin secret.
pub async fn clear_database_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<SecretParams>, QueryRejection>,
) -> Result<Json<ClearResponse>> {
    let Query(params) = params.map_err(bad_query)?;
    state
        .gateway
        .clear_database(params.secret.as_deref())
        .await?;

    Ok(Json(ClearResponse::flushed()))
}

/// Handler for GET /health
///
/// Reports 503 while the key-value store does not answer.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = state.gateway.ping().await.is_ok();
    let status = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(HealthResponse::from_store(reachable)))
}

fn bad_query(rejection: QueryRejection) -> ApiError {
    debug!("Rejected query: {}", rejection.body_text());
    ApiError::BadQuery(rejection.body_text())
}
