//! Cache Module
//!
//! Cache operations exposed by the gateway: set/get pass-through, hit/miss
//! accounting and the admin flush. Storage and eviction are delegated to the
//! key-value store.

mod counters;
mod gateway;


// Re-export public types
pub use counters::{CounterSnapshot, HitMissCounters, CACHE_HITS_KEY, CACHE_MISSES_KEY};
pub use gateway::CacheGateway;
