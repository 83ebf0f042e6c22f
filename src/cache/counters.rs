//! Hit/Miss Counters Module
//!
//! Tracks get outcomes in two reserved keys of the key-value store. Updates
//! go through the store's atomic increment so concurrent gets never lose a
//! count.

use std::sync::Arc;

use serde::Serialize;

use crate::store::{KvStore, Result, StoreError};

/// Reserved key holding the number of cache hits.
pub const CACHE_HITS_KEY: &str = "CACHE_HITS";

/// Reserved key holding the number of cache misses.
pub const CACHE_MISSES_KEY: &str = "CACHE_MISSES";

// == Counter Snapshot ==
/// Point-in-time values of both counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    /// Number of gets that found a value
    pub hits: u64,
    /// Number of gets that found nothing
    pub misses: u64,
}

impl CounterSnapshot {
    // == Hit/Miss Ratio ==
    /// Calculates hits / misses.
    ///
    /// Returns None when there are no misses, since the ratio is undefined.
    pub fn hit_miss_ratio(&self) -> Option<f64> {
        if self.misses == 0 {
            None
        } else {
            Some(self.hits as f64 / self.misses as f64)
        }
    }
}

// == Hit/Miss Counters ==
/// Handle to the counters stored in the key-value store.
#[derive(Clone)]
pub struct HitMissCounters {
    store: Arc<dyn KvStore>,
}

impl HitMissCounters {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    // == Seed ==
    /// Initializes both counters to "0" where they are missing.
    ///
    /// Existing values are left untouched.
    pub async fn seed(&self) -> Result<()> {
        self.store.set_if_absent(CACHE_HITS_KEY, "0").await?;
        self.store.set_if_absent(CACHE_MISSES_KEY, "0").await?;
        Ok(())
    }

    // == Record Hit ==
    pub async fn record_hit(&self) -> Result<u64> {
        self.increment(CACHE_HITS_KEY).await
    }

    // == Record Miss ==
    pub async fn record_miss(&self) -> Result<u64> {
        self.increment(CACHE_MISSES_KEY).await
    }

    // == Snapshot ==
    /// Reads both counters. A missing counter reads as zero.
    pub async fn snapshot(&self) -> Result<CounterSnapshot> {
        let hits = self.read(CACHE_HITS_KEY).await?;
        let misses = self.read(CACHE_MISSES_KEY).await?;
        Ok(CounterSnapshot { hits, misses })
    }

    async fn increment(&self, key: &str) -> Result<u64> {
        let value = self.store.incr(key).await?;
        u64::try_from(value).map_err(|_| StoreError::InvalidCounter {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    async fn read(&self, key: &str) -> Result<u64> {
        match self.store.get(key).await? {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| StoreError::InvalidCounter {
                    key: key.to_string(),
                    value: raw,
                }),
            None => Ok(0),
        }
    }
}
