//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::store::RedisConnectOptions;

/// Memory bound and eviction policy applied to the store at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictionSettings {
    /// Value for the store's `maxmemory` parameter
    pub max_memory: String,
    /// Value for the store's `maxmemory-policy` parameter
    pub policy: String,
}

impl Default for EvictionSettings {
    fn default() -> Self {
        Self {
            max_memory: "1000mb".to_string(),
            policy: "allkeys-lru".to_string(),
        }
    }
}

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Secret required by the flush endpoint; the endpoint is locked when unset
    pub admin_secret: Option<String>,
    /// Redis connection URL
    pub redis_url: String,
    /// Initial connection attempts before startup fails
    pub connect_attempts: u32,
    /// Delay after the first failed connection attempt, in milliseconds
    pub connect_backoff_ms: u64,
    /// Upper bound for one connection attempt, in milliseconds
    pub connect_timeout_ms: u64,
    /// Upper bound for one store command, in milliseconds
    pub response_timeout_ms: u64,
    /// Store memory bound and eviction policy
    pub eviction: EvictionSettings,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 9000)
    /// - `ADMIN_SECRET` - Secret for the flush endpoint (default: unset)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
    /// - `REDIS_CONNECT_ATTEMPTS` - Initial connection attempts (default: 5)
    /// - `REDIS_CONNECT_BACKOFF_MS` - First retry delay (default: 200)
    /// - `REDIS_CONNECT_TIMEOUT_MS` - Per-attempt connect timeout (default: 1000)
    /// - `REDIS_RESPONSE_TIMEOUT_MS` - Per-command timeout (default: 1000)
    /// - `REDIS_MAXMEMORY` - Store memory bound (default: 1000mb)
    /// - `REDIS_MAXMEMORY_POLICY` - Store eviction policy (default: allkeys-lru)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            admin_secret: env::var("ADMIN_SECRET").ok().filter(|s| !s.is_empty()),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            connect_attempts: parse_var("REDIS_CONNECT_ATTEMPTS")
                .unwrap_or(defaults.connect_attempts),
            connect_backoff_ms: parse_var("REDIS_CONNECT_BACKOFF_MS")
                .unwrap_or(defaults.connect_backoff_ms),
            connect_timeout_ms: parse_var("REDIS_CONNECT_TIMEOUT_MS")
                .unwrap_or(defaults.connect_timeout_ms),
            response_timeout_ms: parse_var("REDIS_RESPONSE_TIMEOUT_MS")
                .unwrap_or(defaults.response_timeout_ms),
            eviction: EvictionSettings {
                max_memory: env::var("REDIS_MAXMEMORY").unwrap_or(defaults.eviction.max_memory),
                policy: env::var("REDIS_MAXMEMORY_POLICY").unwrap_or(defaults.eviction.policy),
            },
        }
    }

    /// Connection settings for the Redis store.
    pub fn redis_connect_options(&self) -> RedisConnectOptions {
        RedisConnectOptions {
            url: self.redis_url.clone(),
            attempts: self.connect_attempts,
            backoff: Duration::from_millis(self.connect_backoff_ms),
            connection_timeout: Duration::from_millis(self.connect_timeout_ms),
            response_timeout: Duration::from_millis(self.response_timeout_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 9000,
            admin_secret: None,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            connect_attempts: 5,
            connect_backoff_ms: 200,
            connect_timeout_ms: 1000,
            response_timeout_ms: 1000,
            eviction: EvictionSettings::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
