//! Store Error Module
//!
//! Error type shared by every key-value store backend.

use thiserror::Error;

// == Store Error Enum ==
/// Failure while talking to the key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (refused, timed out or dropped)
    #[error("Store connection failed: {0}")]
    ConnectionFailed(String),

    /// The store answered with an error
    #[error("Store operation failed: {0}")]
    OperationFailed(String),

    /// A counter key holds something that is not an integer
    #[error("Counter '{key}' holds a non-integer value: {value}")]
    InvalidCounter { key: String, value: String },
}

impl StoreError {
    /// Returns true when the failure means the store is unreachable.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, StoreError::ConnectionFailed(_))
    }
}

/// Maps Redis errors to StoreError.
pub fn map_redis_error(err: redis::RedisError) -> StoreError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        StoreError::ConnectionFailed(err.to_string())
    } else {
        StoreError::OperationFailed(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
