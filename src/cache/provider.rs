//! Cache provider abstraction and the in-process Moka-backed store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use moka::sync::Cache;
use serde::Serialize;
use tracing::debug;

use crate::value::Value;

use super::{CacheConfig, KeyFilter};

/// Snapshot of a store's hit/miss accounting.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Contract a cache store exposes to the compatibility layer.
///
/// Key enumeration is the part the legacy BIFs depend on; the CRUD
/// surface exists so a store can be populated and exercised through the
/// same abstraction.
pub trait CacheProvider: Send + Sync {
    /// The store's registered name.
    fn name(&self) -> &str;

    /// Get a value by key.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a value under a key.
    fn set(&self, key: &str, value: Value);

    /// Check whether a key is present.
    fn contains(&self, key: &str) -> bool;

    /// Remove a key. Returns `true` if it was present.
    fn clear(&self, key: &str) -> bool;

    /// All keys currently in the store, as a fresh collection.
    ///
    /// The result is never a live view; order is unspecified but the
    /// set is deterministic for a fixed store state.
    fn get_keys(&self) -> Vec<String>;

    /// Keys matching `filter`, as a fresh collection.
    fn get_keys_filtered(&self, filter: &KeyFilter) -> Vec<String> {
        self.get_keys()
            .into_iter()
            .filter(|key| filter.matches(key))
            .collect()
    }

    /// Hit/miss accounting snapshot.
    fn stats(&self) -> CacheStats;
}

/// Moka-backed in-process cache store.
///
/// Thread-safe; intended to be shared as `Arc<MemoryCache>` via the
/// registry. Entries are evicted per the store's `CacheConfig`
/// (capacity, TTL, TTI).
pub struct MemoryCache {
    inner: Cache<String, Value>,
    name: Arc<str>,
    hits: AtomicU64,
    misses: AtomicU64,
    /// Per-key hit counter, for inspecting what the store actually serves.
    hit_counter: DashMap<String, AtomicU64>,
}

impl MemoryCache {
    /// Create a new store with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        Self {
            inner: builder.build(),
            name: name.into(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            hit_counter: DashMap::new(),
        }
    }

    /// Number of entries in the store.
    ///
    /// Note: this may not be perfectly accurate due to concurrent
    /// operations.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// How many times `key` has been served from this store.
    pub fn hit_count(&self, key: &str) -> u64 {
        self.hit_counter
            .get(key)
            .map(|counter| counter.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Remove all entries from the store.
    pub fn clear_all(&self) {
        self.inner.invalidate_all();
        self.hit_counter.clear();
    }
}

impl CacheProvider for MemoryCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<Value> {
        match self.inner.get(key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.hit_counter
                    .entry(key.to_string())
                    .or_default()
                    .fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, key: &str, value: Value) {
        self.inner.insert(key.to_string(), value);
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    fn clear(&self, key: &str) -> bool {
        let existed = self.inner.contains_key(key);
        self.inner.invalidate(key);
        self.hit_counter.remove(key);
        if existed {
            debug!("Cleared key '{}' from cache '{}'", key, self.name);
        }
        existed
    }

    fn get_keys(&self) -> Vec<String> {
        self.inner.iter().map(|(key, _)| (*key).clone()).collect()
    }

    fn get_keys_filtered(&self, filter: &KeyFilter) -> Vec<String> {
        // Filter during iteration rather than materializing twice.
        self.inner
            .iter()
            .filter(|(key, _)| filter.matches(key))
            .map(|(key, _)| (*key).clone())
            .collect()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated(keys: &[&str]) -> MemoryCache {
        let cache = MemoryCache::new("test", CacheConfig::default());
        for key in keys {
            cache.set(key, Value::Bool(true));
        }
        cache
    }

    #[test]
    fn test_crud_round_trip() {
        let cache = MemoryCache::new("crud", CacheConfig::default());

        cache.set("k", Value::from("v"));
        assert!(cache.contains("k"));
        assert_eq!(cache.get("k"), Some(Value::from("v")));

        assert!(cache.clear("k"));
        assert!(!cache.clear("k"));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_get_keys_returns_fresh_collection() {
        let cache = populated(&["alpha", "beta"]);

        let mut keys = cache.get_keys();
        keys.sort();
        assert_eq!(keys, vec!["alpha", "beta"]);

        // Mutating the result does not touch the store.
        keys.clear();
        assert_eq!(cache.get_keys().len(), 2);
    }

    #[test]
    fn test_get_keys_filtered() {
        let cache = populated(&["alpha", "album", "beta"]);

        let filter = KeyFilter::wildcard("al*");
        let mut keys = cache.get_keys_filtered(&filter);
        keys.sort();
        assert_eq!(keys, vec!["album", "alpha"]);
    }

    #[test]
    fn test_stats_accounting() {
        let cache = populated(&["hit"]);

        cache.get("hit");
        cache.get("hit");
        cache.get("absent");

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(cache.hit_count("hit"), 2);
        assert_eq!(cache.hit_count("absent"), 0);
    }
}
