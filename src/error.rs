//! Error types for the cache gateway
//!
//! Every failure outcome of the HTTP API, rendered with the body shape and
//! error code its endpoint promises.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorCode, FailureResponse, GetResponse};
use crate::store::StoreError;

// == Api Error Enum ==
/// Failure outcome of a gateway operation.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key is missing or blank on a write
    #[error("invalid key. 'key' should not be empty")]
    InvalidKey,

    /// Key is missing or blank on a lookup; answered with the get sentinel
    #[error("invalid key. 'key' should not be empty")]
    InvalidGetKey,

    /// Query string could not be decoded into the endpoint's parameters
    #[error("invalid query string: {0}")]
    BadQuery(String),

    /// Store rejected or could not complete a set
    #[error("error while set() key and value")]
    SetFailed(#[source] StoreError),

    /// Store rejected or could not complete a get
    #[error("error while get() key")]
    GetFailed(#[source] StoreError),

    /// Counters could not be read
    #[error("error occurred while get() hits and misses")]
    StatsFailed(#[source] StoreError),

    /// Admin secret mismatch
    #[error("Unauthorized access!")]
    Unauthorized,

    /// Store flush failed
    #[error("Some error occurred while flushing the cache db")]
    FlushFailed(#[source] StoreError),
}

impl ApiError {
    /// Stable error code reported to clients, if the outcome has one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ApiError::InvalidKey => Some(ErrorCode::InvalidKey),
            ApiError::SetFailed(_) => Some(ErrorCode::SetFailed),
            ApiError::StatsFailed(_) => Some(ErrorCode::StatsFailed),
            ApiError::FlushFailed(_) => Some(ErrorCode::FlushFailed),
            ApiError::InvalidGetKey
            | ApiError::BadQuery(_)
            | ApiError::GetFailed(_)
            | ApiError::Unauthorized => None,
        }
    }

    /// HTTP status for this outcome.
    ///
    /// An unreachable store yields 503 so clients can tell it apart from a
    /// command the store rejected. Stats failures are reported in the body only.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidKey | ApiError::InvalidGetKey | ApiError::BadQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::StatsFailed(_) => StatusCode::OK,
            ApiError::SetFailed(err) | ApiError::GetFailed(err) | ApiError::FlushFailed(err) => {
                if err.is_connection_failure() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::GetFailed(_) | ApiError::InvalidGetKey = self {
            return (status, Json(GetResponse::failed())).into_response();
        }

        let body = Json(FailureResponse::new(self.code(), self.to_string()));
        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;
