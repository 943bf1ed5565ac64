//! Cache module - named stores with filtered key enumeration.
//!
//! This module provides the store side of the legacy cache BIFs: a
//! registry of named Moka-backed stores and the key filters used to
//! enumerate them.
//!
//! ## Architecture
//!
//! - `CacheRegistry` - Central registry holding all named stores
//! - `CacheProvider` - Contract a store exposes to the BIF layer
//! - `MemoryCache` - In-process Moka-backed provider
//! - `KeyFilter` - Wildcard/regex key predicates for enumeration
//!
//! ## Usage
//!
//! ```rust
//! use cfcompat::cache::{CacheConfig, CacheProvider, CacheRegistry, KeyFilter};
//! use cfcompat::value::Value;
//!
//! let registry = CacheRegistry::new();
//! let cache = registry.get_or_create("sessions", CacheConfig::default());
//!
//! cache.set("user:7", Value::Bool(true));
//!
//! let filter = KeyFilter::wildcard("user:*");
//! assert_eq!(cache.get_keys_filtered(&filter), vec!["user:7".to_string()]);
//! ```

mod config;
mod filters;
mod provider;
mod registry;

pub use config::CacheConfig;
pub use filters::{KeyFilter, RegexFilter, WildcardFilter};
pub use provider::{CacheProvider, CacheStats, MemoryCache};
pub use registry::CacheRegistry;
