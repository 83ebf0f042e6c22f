//! Request DTOs for the cache gateway API
//!
//! All inputs arrive as query parameters. Every field is optional so that a
//! missing parameter reaches the gateway's own validation instead of being
//! rejected by the extractor.

use serde::Deserialize;

/// Query parameters for POST /api/v1/cache/set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetParams {
    /// The cache key
    pub key: Option<String>,
    /// The value to store; an absent value stores the empty string
    pub value: Option<String>,
}

/// Query parameters for GET /api/v1/cache/get
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyParams {
    pub key: Option<String>,
}

/// Query parameters for DELETE /api/v1/cache/cleardatabase
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretParams {
    /// Admin secret authorizing the flush
    pub secret: Option<String>,
}
