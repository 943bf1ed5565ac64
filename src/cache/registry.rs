//! Cache registry - central management for named cache stores.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::CompatConfig;

use super::{CacheConfig, MemoryCache};

/// Central registry for named cache stores.
///
/// Callers resolve a cache name here - and decide what a missing cache
/// means - before handing the store to the enumeration BIF. The
/// registry is passed around explicitly rather than living in a
/// process-wide singleton, so each embedding (and each test) owns its
/// own set of stores.
///
/// ## Example
///
/// ```rust
/// use cfcompat::cache::{CacheConfig, CacheRegistry};
///
/// let registry = CacheRegistry::new();
/// let sessions = registry.get_or_create("sessions", CacheConfig::default());
///
/// // Later, retrieve the same store
/// let sessions = registry.get("sessions").unwrap();
/// ```
#[derive(Clone)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, Arc<MemoryCache>>>>,
    default_name: Arc<str>,
    default_config: CacheConfig,
}

impl CacheRegistry {
    /// Create a new registry with stock defaults.
    pub fn new() -> Self {
        Self::with_config(&CompatConfig::default())
    }

    /// Create a registry whose default cache follows `config`.
    pub fn with_config(config: &CompatConfig) -> Self {
        info!("Cache registry initialized");
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
            default_name: Arc::from(config.default_cache.as_str()),
            default_config: config.cache.clone(),
        }
    }

    /// Create a store and register it.
    ///
    /// If a store with the same name already exists, it is returned
    /// unchanged and `config` is ignored.
    pub fn create(&self, name: &str, config: CacheConfig) -> Arc<MemoryCache> {
        let mut caches = self.caches.write();

        if let Some(existing) = caches.get(name) {
            return Arc::clone(existing);
        }

        debug!("Creating cache: {}", name);

        let cache = Arc::new(MemoryCache::new(name, config));
        caches.insert(name.to_string(), Arc::clone(&cache));
        cache
    }

    /// Get an existing store by name.
    ///
    /// Returns `None` if the store doesn't exist; what that means is
    /// the caller's decision (the legacy runtime treats it as an
    /// argument validation failure before the BIF body runs).
    pub fn get(&self, name: &str) -> Option<Arc<MemoryCache>> {
        self.caches.read().get(name).map(Arc::clone)
    }

    /// Get an existing store or create it if it doesn't exist.
    pub fn get_or_create(&self, name: &str, config: CacheConfig) -> Arc<MemoryCache> {
        if let Some(cache) = self.get(name) {
            return cache;
        }
        self.create(name, config)
    }

    /// The default store, created on first access.
    pub fn default_cache(&self) -> Arc<MemoryCache> {
        self.get_or_create(&self.default_name, self.default_config.clone())
    }

    /// Name of the default store.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Check if a store with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Remove a store from the registry.
    ///
    /// Returns `true` if the store was removed. Handles already held by
    /// callers keep working; the name just stops resolving.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.caches.write().remove(name).is_some();
        if removed {
            debug!("Removed cache: {}", name);
        }
        removed
    }

    /// Get the number of registered stores.
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }

    /// Get a list of all registered store names.
    pub fn cache_names(&self) -> Vec<String> {
        self.caches.read().keys().cloned().collect()
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let caches = self.caches.read();
        f.debug_struct("CacheRegistry")
            .field("cache_count", &caches.len())
            .field("cache_names", &caches.keys().collect::<Vec<_>>())
            .finish()
    }
}
