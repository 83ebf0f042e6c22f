//! Store Module
//!
//! Client side of the external key-value store. Storage, the memory bound and
//! LRU eviction all live in the store; the gateway only talks to it through
//! the [`KvStore`] trait.

mod error;
mod memory;
mod redis_store;

use async_trait::async_trait;

pub use error::{map_redis_error, Result, StoreError};
pub use memory::MemoryStore;
pub use redis_store::{RedisConnectOptions, RedisStore};

/// Operations the gateway needs from the key-value store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Gets a value by key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, overwriting any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Stores a value only when the key is absent. Returns true if it was written.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool>;

    /// Atomically increments an integer value, treating a missing key as 0.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Sets a server configuration parameter.
    async fn config_set(&self, parameter: &str, value: &str) -> Result<()>;

    /// Removes every key from the active database without blocking the store.
    async fn flush_async(&self) -> Result<()>;

    /// Checks that the store answers.
    async fn ping(&self) -> Result<()>;
}
