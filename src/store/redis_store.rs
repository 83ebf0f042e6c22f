//! Redis Store Module
//!
//! Production [`KvStore`] backed by a Redis connection manager. The manager
//! reconnects on its own after a dropped connection. It is configured without
//! internal retries and with bounded connect/response timeouts, so calls made
//! while the server is unreachable fail quickly with
//! [`StoreError::ConnectionFailed`].

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tracing::{info, warn};

use super::error::{map_redis_error, Result, StoreError};
use super::KvStore;

/// Settings for establishing the initial Redis connection.
#[derive(Debug, Clone)]
pub struct RedisConnectOptions {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379")
    pub url: String,
    /// Number of connection attempts before giving up
    pub attempts: u32,
    /// Delay before the second attempt, doubled after every failure
    pub backoff: Duration,
    /// Upper bound for establishing one TCP connection
    pub connection_timeout: Duration,
    /// Upper bound for a single command round trip
    pub response_timeout: Duration,
}

impl RedisConnectOptions {
    /// Options for `url` with a single attempt and one second timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempts: 1,
            backoff: Duration::from_millis(200),
            connection_timeout: Duration::from_secs(1),
            response_timeout: Duration::from_secs(1),
        }
    }

    /// Connection manager settings: no hidden retries, bounded timeouts.
    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_max_delay(self.backoff.as_millis() as u64)
            .set_connection_timeout(self.connection_timeout)
            .set_response_timeout(self.response_timeout)
    }
}

/// Redis store using a shared connection manager.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis once, without retrying.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConnectionFailed` if the server cannot be reached
    /// within `connection_timeout`.
    pub async fn connect(options: &RedisConnectOptions) -> Result<Self> {
        let client = redis::Client::open(options.url.as_str()).map_err(map_redis_error)?;
        let conn = ConnectionManager::new_with_config(client, options.manager_config())
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }

    /// Connects to Redis, retrying with exponential backoff.
    ///
    /// Returns the last error once every attempt has failed.
    pub async fn connect_with_retry(options: &RedisConnectOptions) -> Result<Self> {
        let attempts = options.attempts.max(1);
        let mut delay = options.backoff;

        for attempt in 1..=attempts {
            match Self::connect(options).await {
                Ok(store) => {
                    info!("Connected to Redis at {} (attempt {})", options.url, attempt);
                    return Ok(store);
                }
                Err(err) if attempt < attempts => {
                    warn!(
                        "Redis connection attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                Err(err) => {
                    warn!("Redis connection attempt {}/{} failed: {}", attempt, attempts, err);
                    return Err(err);
                }
            }
        }

        Err(StoreError::ConnectionFailed(format!(
            "no connection attempts made to {}",
            options.url
        )))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let written: bool = conn.set_nx(key, value).await.map_err(map_redis_error)?;
        Ok(written)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await.map_err(map_redis_error)?;
        Ok(value)
    }

    async fn config_set(&self, parameter: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("CONFIG")
            .arg("SET")
            .arg(parameter)
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn flush_async(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB")
            .arg("ASYNC")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
