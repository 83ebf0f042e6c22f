//! Request and Response models for the cache gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query parameters and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{KeyParams, SecretParams, SetParams};
pub use responses::{
    ClearResponse, ErrorCode, FailureResponse, GetResponse, HealthResponse, StatsResponse,
    StatusResponse, GET_FAILED_SENTINEL,
};
