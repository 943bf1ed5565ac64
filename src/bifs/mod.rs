//! Built-in function entry points.
//!
//! Thin wrappers shaped like the legacy built-ins they reproduce.
//! Argument type checking and cache-name resolution happen in the host
//! before these are called; the functions here only compose the core
//! components.
//!
//! - `struct_get` - tolerant nested struct access
//! - `cache_get_all_ids` - filtered cache key enumeration
//! - `cache_set_properties` - deliberately disabled

use crate::cache::{CacheProvider, KeyFilter};
use crate::error::{CompatError, PatternError};
use crate::value::{Value, path};

/// `structGet(path)` - resolve a dotted path against a root value.
///
/// Never fails: a bad or partially missing path yields an empty struct,
/// and missing segments are created in the root as a side effect. See
/// [`path::resolve`] for the full contract.
pub fn struct_get(root: &Value, path: &str) -> Value {
    path::resolve(root, path)
}

/// `cacheGetAllIds(filter, useRegex)` - enumerate keys in a cache.
///
/// An empty pattern returns every key without constructing a filter.
/// Otherwise the pattern is compiled as a wildcard filter, or as a full
/// regular expression when `use_regex` is set; an invalid regex is the
/// only error this can produce.
///
/// The caller resolves the cache name to a provider (and validates that
/// the cache exists) before this point.
pub fn cache_get_all_ids(
    cache: &dyn CacheProvider,
    pattern: &str,
    use_regex: bool,
) -> Result<Vec<String>, PatternError> {
    // No filter? get all of them
    if pattern.is_empty() {
        return Ok(cache.get_keys());
    }

    // Build the right filter
    let filter = KeyFilter::from_pattern(pattern, use_regex)?;

    // Filter the keys
    Ok(cache.get_keys_filtered(&filter))
}

/// `cacheSetProperties(properties)` - always refused.
///
/// The legacy runtime allowed reconfiguring a cache engine at runtime
/// from script code; this layer keeps the call signature but rejects
/// every invocation.
pub fn cache_set_properties(
    _cache: &dyn CacheProvider,
    _properties: &Value,
) -> Result<Value, CompatError> {
    Err(CompatError::Unsupported("cacheSetProperties"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, MemoryCache};
    use crate::value::Mapping;

    fn store_with(keys: &[&str]) -> MemoryCache {
        let cache = MemoryCache::new("bif-test", CacheConfig::default());
        for key in keys {
            cache.set(key, Value::Bool(true));
        }
        cache
    }

    #[test]
    fn test_struct_get_mutates_root() {
        let root = Mapping::new();

        let result = struct_get(&Value::Struct(root.clone()), "ref.a.b.c");

        assert!(result.is_struct());
        let a = root.get("a").and_then(|v| v.as_struct()).unwrap();
        let b = a.get("b").and_then(|v| v.as_struct()).unwrap();
        assert!(b.contains_key("c"));
    }

    #[test]
    fn test_empty_pattern_returns_all_keys() {
        let cache = store_with(&["alpha", "album", "beta"]);

        let mut all = cache_get_all_ids(&cache, "", false).unwrap();
        let mut direct = cache.get_keys();
        all.sort();
        direct.sort();

        assert_eq!(all, direct);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_wildcard_enumeration() {
        let cache = store_with(&["alpha", "album", "beta"]);

        let mut ids = cache_get_all_ids(&cache, "al*", false).unwrap();
        ids.sort();

        assert_eq!(ids, vec!["album", "alpha"]);
    }

    #[test]
    fn test_regex_enumeration() {
        let cache = store_with(&["alpha", "album", "beta"]);

        let mut ids = cache_get_all_ids(&cache, "^b.*a$", true).unwrap();
        ids.sort();

        assert_eq!(ids, vec!["beta"]);
    }

    #[test]
    fn test_invalid_regex_propagates() {
        let cache = store_with(&["alpha"]);

        let err = cache_get_all_ids(&cache, "[", true).unwrap_err();
        assert_eq!(err.pattern(), "[");
    }

    #[test]
    fn test_cache_set_properties_is_refused() {
        let cache = store_with(&[]);

        let err = cache_set_properties(&cache, &Value::empty_struct()).unwrap_err();
        assert!(matches!(err, CompatError::Unsupported(_)));
        assert!(err.to_string().contains("security risk"));
    }
}
