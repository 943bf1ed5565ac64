//! Configuration module for the compatibility layer.
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Compatibility layer configuration.
///
/// Every knob has a default; a missing or unparsable variable falls
/// back rather than failing, since the layer is embedded in a host
/// runtime that may not set any of this up.
#[derive(Debug, Clone)]
pub struct CompatConfig {
    /// Name of the default cache store.
    pub default_cache: String,

    /// Configuration applied to the default cache store.
    pub cache: CacheConfig,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            default_cache: "default".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl CompatConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `CFCOMPAT_DEFAULT_CACHE` - default store name
    /// - `CFCOMPAT_CACHE_CAPACITY` - default store max entries
    /// - `CFCOMPAT_CACHE_TTL_SECS` - default store TTL in seconds
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let default_cache =
            env::var("CFCOMPAT_DEFAULT_CACHE").unwrap_or_else(|_| "default".to_string());

        let max_capacity = env::var("CFCOMPAT_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let ttl_secs = env::var("CFCOMPAT_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let cache = CacheConfig::with_capacity(max_capacity).ttl(Duration::from_secs(ttl_secs));

        Self {
            default_cache,
            cache,
        }
    }
}
