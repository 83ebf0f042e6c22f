//! Response DTOs for the cache gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Serialize, Serializer};

use crate::cache::CounterSnapshot;

/// Value returned by GET /get when the store call fails.
pub const GET_FAILED_SENTINEL: &str = "-1";

/// Body for a successful POST /set
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// Body for GET /get
///
/// `value` is null when the key is absent.
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub value: Option<String>,
}

impl GetResponse {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }

    /// Body sent instead of the value when the lookup failed.
    pub fn failed() -> Self {
        Self {
            value: Some(GET_FAILED_SENTINEL.to_string()),
        }
    }
}

/// Body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// hits / misses, null while there are no misses
    pub hit_miss_ratio: Option<f64>,
}

impl From<CounterSnapshot> for StatsResponse {
    fn from(snapshot: CounterSnapshot) -> Self {
        Self {
            cache_hits: snapshot.hits,
            cache_misses: snapshot.misses,
            hit_miss_ratio: snapshot.hit_miss_ratio(),
        }
    }
}

/// Body for a successful DELETE /cleardatabase
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
    pub message: String,
}

impl ClearResponse {
    pub fn flushed() -> Self {
        Self {
            status: "success",
            message: "cache database flushed successfully".to_string(),
        }
    }
}

/// Body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "connected" or "unreachable"
    pub store: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Builds the health report for the given store reachability.
    pub fn from_store(reachable: bool) -> Self {
        let (status, store) = if reachable {
            ("healthy", "connected")
        } else {
            ("degraded", "unreachable")
        };
        Self {
            status: status.to_string(),
            store: store.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Error Codes ==
/// Stable codes attached to failure bodies.
///
/// Stats failures serialize as a JSON number; the others as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// 9001: blank or missing key
    InvalidKey,
    /// 9002: store failure during set
    SetFailed,
    /// 9100: store failure while reading counters
    StatsFailed,
    /// 9200: store failure during flush
    FlushFailed,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        match self {
            ErrorCode::InvalidKey => 9001,
            ErrorCode::SetFailed => 9002,
            ErrorCode::StatsFailed => 9100,
            ErrorCode::FlushFailed => 9200,
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorCode::StatsFailed => serializer.serialize_u16(self.as_u16()),
            _ => serializer.serialize_str(&self.as_u16().to_string()),
        }
    }
}

/// Failure body shared by every endpoint except GET /get
#[derive(Debug, Clone, Serialize)]
pub struct FailureResponse {
    pub status: &'static str,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    pub message: String,
}

impl FailureResponse {
    pub fn new(error_code: Option<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            status: "failed",
            error_code,
            message: message.into(),
        }
    }
}
