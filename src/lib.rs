//! Cache Gateway - HTTP front-end for a Redis-backed LRU cache
//!
//! Passes set/get through to the key-value store, counts hits and misses,
//! and lets an admin flush the store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use cache::CacheGateway;
pub use config::Config;
