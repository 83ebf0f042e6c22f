//! Cache Gateway Module
//!
//! Translates cache operations into calls against the key-value store and
//! owns the store's startup configuration.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::cache::{CounterSnapshot, HitMissCounters};
use crate::config::EvictionSettings;
use crate::error::{ApiError, Result};
use crate::store::{self, KvStore};

/// Store parameter holding the memory bound.
const MAXMEMORY_PARAM: &str = "maxmemory";

/// Store parameter holding the eviction policy.
const MAXMEMORY_POLICY_PARAM: &str = "maxmemory-policy";

// == Cache Gateway ==
/// Bridge between the HTTP API and the key-value store.
///
/// Cloning is cheap; clones share the same store handle.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn KvStore>,
    counters: HitMissCounters,
    admin_secret: Option<Arc<str>>,
}

impl CacheGateway {
    // == Constructor ==
    /// Creates a gateway over an already constructed store.
    ///
    /// Without an admin secret, `clear_database` rejects every request.
    pub fn new(store: Arc<dyn KvStore>, admin_secret: Option<String>) -> Self {
        Self {
            counters: HitMissCounters::new(store.clone()),
            store,
            admin_secret: admin_secret.map(Arc::from),
        }
    }

    // == Initialize ==
    /// Applies the memory bound and eviction policy, then seeds the counters.
    ///
    /// A rejected CONFIG SET is logged and skipped; a failure to seed the
    /// counters is returned.
    pub async fn initialize(&self, eviction: &EvictionSettings) -> store::Result<()> {
        self.apply_config(MAXMEMORY_PARAM, &eviction.max_memory).await;
        self.apply_config(MAXMEMORY_POLICY_PARAM, &eviction.policy).await;

        self.counters.seed().await?;
        info!("Hit/miss counters initialized");
        Ok(())
    }

    async fn apply_config(&self, parameter: &str, value: &str) {
        match self.store.config_set(parameter, value).await {
            Ok(()) => info!("Store {} updated to {}", parameter, value),
            Err(err) => warn!("Failed to update store {} to {}: {}", parameter, value, err),
        }
    }

    // == Set ==
    /// Stores a value under a key, overwriting any previous value.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = normalize_key(key).ok_or(ApiError::InvalidKey)?;
        self.store.set(key, value).await.map_err(|err| {
            error!("Set failed for key '{}': {}", key, err);
            ApiError::SetFailed(err)
        })
    }

    // == Get ==
    /// Looks up a key and records the outcome as a hit or a miss.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = normalize_key(key).ok_or(ApiError::InvalidGetKey)?;
        self.lookup(key).await.map_err(|err| {
            error!("Get failed for key '{}': {}", key, err);
            ApiError::GetFailed(err)
        })
    }

    async fn lookup(&self, key: &str) -> store::Result<Option<String>> {
        let value = self.store.get(key).await?;
        if value.is_some() {
            self.counters.record_hit().await?;
        } else {
            self.counters.record_miss().await?;
        }
        Ok(value)
    }

    // == Stats ==
    /// Reads the hit and miss counters.
    pub async fn stats(&self) -> Result<CounterSnapshot> {
        self.counters.snapshot().await.map_err(|err| {
            error!("Reading hit/miss counters failed: {}", err);
            ApiError::StatsFailed(err)
        })
    }

    // == Clear Database ==
    /// Flushes every key, counters included, when `secret` matches the admin
    /// secret. The counters are seeded back to zero after the flush.
    pub async fn clear_database(&self, secret: Option<&str>) -> Result<()> {
        let authorized = match (self.admin_secret.as_deref(), secret) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        };
        if !authorized {
            warn!("Rejected cache flush with invalid admin secret");
            return Err(ApiError::Unauthorized);
        }

        self.flush_and_reseed().await.map_err(|err| {
            error!("Flushing the cache database failed: {}", err);
            ApiError::FlushFailed(err)
        })?;
        info!("Cache database flushed");
        Ok(())
    }

    async fn flush_and_reseed(&self) -> store::Result<()> {
        self.store.flush_async().await?;
        self.counters.seed().await
    }

    // == Ping ==
    /// Checks that the key-value store answers.
    pub async fn ping(&self) -> store::Result<()> {
        self.store.ping().await
    }
}

/// Trims a key; `None` when nothing is left.
fn normalize_key(key: &str) -> Option<&str> {
    let key = key.trim();
    (!key.is_empty()).then_some(key)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CACHE_HITS_KEY, CACHE_MISSES_KEY};
    use crate::store::MemoryStore;

    const SECRET: &str = "s3cret";

    async fn ready_gateway() -> (MemoryStore, CacheGateway) {
        let store = MemoryStore::new();
        let gateway = CacheGateway::new(Arc::new(store.clone()), Some(SECRET.to_string()));
        gateway
            .initialize(&EvictionSettings::default())
            .await
            .unwrap();
        (store, gateway)
    }

    #[tokio::test]
    async fn test_initialize_configures_store() {
        let (store, _gateway) = ready_gateway().await;

        assert_eq!(
            store.config_value("maxmemory").await,
            Some("1000mb".to_string())
        );
        assert_eq!(
            store.config_value("maxmemory-policy").await,
            Some("allkeys-lru".to_string())
        );
        assert_eq!(store.get(CACHE_HITS_KEY).await.unwrap(), Some("0".into()));
        assert_eq!(store.get(CACHE_MISSES_KEY).await.unwrap(), Some("0".into()));
    }

    #[tokio::test]
    async fn test_initialize_fails_when_store_offline() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let gateway = CacheGateway::new(Arc::new(store), None);

        assert!(gateway
            .initialize(&EvictionSettings::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_initialize_survives_rejected_config() {
        let store = MemoryStore::new();
        store.set_reject_config(true);
        let gateway = CacheGateway::new(Arc::new(store.clone()), None);

        gateway
            .initialize(&EvictionSettings::default())
            .await
            .unwrap();

        assert_eq!(store.config_value("maxmemory").await, None);
        assert_eq!(store.config_value("maxmemory-policy").await, None);
        assert_eq!(store.get(CACHE_HITS_KEY).await.unwrap(), Some("0".into()));
        assert_eq!(store.get(CACHE_MISSES_KEY).await.unwrap(), Some("0".into()));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_store, gateway) = ready_gateway().await;

        gateway.set("foo", "bar").await.unwrap();
        assert_eq!(gateway.get("foo").await.unwrap(), Some("bar".to_string()));

        gateway.set("foo", "baz").await.unwrap();
        assert_eq!(gateway.get("foo").await.unwrap(), Some("baz".to_string()));
    }

    #[tokio::test]
    async fn test_keys_are_trimmed() {
        let (_store, gateway) = ready_gateway().await;

        gateway.set("  padded ", "v").await.unwrap();
        assert_eq!(gateway.get("padded").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_blank_key_rejected() {
        let (_store, gateway) = ready_gateway().await;

        assert!(matches!(gateway.set("   ", "v").await, Err(ApiError::InvalidKey)));
        assert!(matches!(gateway.get("").await, Err(ApiError::InvalidGetKey)));
        assert!(matches!(gateway.get(" \t").await, Err(ApiError::InvalidGetKey)));
        assert_eq!(gateway.stats().await.unwrap(), CounterSnapshot::default());
    }

    #[tokio::test]
    async fn test_get_records_hits_and_misses() {
        let (_store, gateway) = ready_gateway().await;
        gateway.set("present", "1").await.unwrap();

        assert_eq!(gateway.get("absent").await.unwrap(), None);
        assert!(gateway.get("present").await.unwrap().is_some());
        assert!(gateway.get("present").await.unwrap().is_some());

        let stats = gateway.stats().await.unwrap();
        assert_eq!(stats, CounterSnapshot { hits: 2, misses: 1 });
    }

    #[tokio::test]
    async fn test_store_failures_are_reported_per_operation() {
        let (store, gateway) = ready_gateway().await;
        store.set_offline(true);

        assert!(matches!(gateway.set("k", "v").await, Err(ApiError::SetFailed(_))));
        assert!(matches!(gateway.get("k").await, Err(ApiError::GetFailed(_))));
        assert!(matches!(gateway.stats().await, Err(ApiError::StatsFailed(_))));
        assert!(matches!(
            gateway.clear_database(Some(SECRET)).await,
            Err(ApiError::FlushFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_database_wrong_secret_changes_nothing() {
        let (store, gateway) = ready_gateway().await;
        gateway.set("keep", "me").await.unwrap();
        gateway.get("keep").await.unwrap();
        let keys_before = store.len().await;

        let result = gateway.clear_database(Some("wrong")).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));

        let result = gateway.clear_database(None).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));

        assert_eq!(store.len().await, keys_before);
        assert_eq!(store.get("keep").await.unwrap(), Some("me".to_string()));
        assert_eq!(store.get(CACHE_HITS_KEY).await.unwrap(), Some("1".into()));
    }

    #[tokio::test]
    async fn test_clear_database_without_configured_secret_is_unauthorized() {
        let store = MemoryStore::new();
        let gateway = CacheGateway::new(Arc::new(store.clone()), None);
        store.set("keep", "me").await.unwrap();

        let result = gateway.clear_database(Some("")).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_database_flushes_and_reseeds() {
        let (store, gateway) = ready_gateway().await;
        gateway.set("a", "1").await.unwrap();
        gateway.set("b", "2").await.unwrap();
        gateway.get("a").await.unwrap();

        gateway.clear_database(Some(SECRET)).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(gateway.stats().await.unwrap(), CounterSnapshot::default());
        assert_eq!(gateway.get("a").await.unwrap(), None);
        assert_eq!(gateway.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_gets_are_counted_exactly() {
        let (_store, gateway) = ready_gateway().await;
        gateway.set("hot", "x").await.unwrap();

        let mut handles = Vec::new();
        for i in 0..64 {
            let gateway = gateway.clone();
            handles.push(tokio::spawn(async move {
                let key = if i % 2 == 0 { "hot" } else { "cold" };
                gateway.get(key).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = gateway.stats().await.unwrap();
        assert_eq!(stats, CounterSnapshot { hits: 32, misses: 32 });
    }
}
