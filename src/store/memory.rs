//! In-Memory Store Module
//!
//! A [`KvStore`] kept inside the process. It has the same observable
//! semantics as the Redis backend for the commands the gateway uses, and can be
//! switched offline to simulate an unreachable store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::{Result, StoreError};
use super::KvStore;

/// In-process key-value store.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    settings: Arc<RwLock<HashMap<String, String>>>,
    offline: Arc<AtomicBool>,
    reject_config: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Creates an empty, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a connection error (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes `config_set` fail the way a managed server that forbids CONFIG does.
    pub fn set_reject_config(&self, reject: bool) {
        self.reject_config.store(reject, Ordering::SeqCst);
    }

    /// Returns a configuration parameter previously applied with `config_set`.
    pub async fn config_value(&self, parameter: &str) -> Option<String> {
        self.settings.read().await.get(parameter).cloned()
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no keys are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::ConnectionFailed(
                "in-memory store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_online()?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_online()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        self.ensure_online()?;
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.ensure_online()?;
        // Read and write happen under one write guard, like Redis INCR.
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                StoreError::OperationFailed(
                    "ERR value is not an integer or out of range".to_string(),
                )
            })?,
            None => 0,
        };
        let next = current.checked_add(1).ok_or_else(|| {
            StoreError::OperationFailed("ERR increment or decrement would overflow".to_string())
        })?;
        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn config_set(&self, parameter: &str, value: &str) -> Result<()> {
        self.ensure_online()?;
        if self.reject_config.load(Ordering::SeqCst) {
            return Err(StoreError::OperationFailed(
                "ERR unknown command 'CONFIG'".to_string(),
            ));
        }
        self.settings
            .write()
            .await
            .insert(parameter.to_string(), value.to_string());
        Ok(())
    }

    async fn flush_async(&self) -> Result<()> {
        self.ensure_online()?;
        self.entries.write().await.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_online()
    }
}
