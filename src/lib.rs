//! Cfcompat - Legacy CFML Compatibility Layer
//!
//! Reproduces Adobe-era behaviors that scripts migrating from the
//! legacy runtime still depend on: struct access that never errors (and
//! mutates on the way down), and cache key enumeration with wildcard or
//! regex filtering.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `value` - Scripting value model (case-insensitive, shared structs)
//! - `cache` - Named cache stores and key filters (Moka)
//! - `bifs` - Built-in function entry points
//! - `error` - Typed errors
//!
//! ## Usage
//!
//! ```rust
//! use cfcompat::{struct_get, Mapping, Value};
//!
//! let root = Mapping::new();
//! let result = struct_get(&Value::Struct(root.clone()), "ref.a.b.c");
//!
//! // The lookup "failed", so the result is an empty struct - and the
//! // missing path now exists in the root.
//! assert!(result.is_struct());
//! assert!(root.contains_key("a"));
//! ```

pub mod bifs;
pub mod cache;
pub mod config;
pub mod error;
pub mod value;

pub use bifs::{cache_get_all_ids, cache_set_properties, struct_get};
pub use cache::{CacheConfig, CacheProvider, CacheRegistry, KeyFilter, MemoryCache};
pub use config::CompatConfig;
pub use error::{CompatError, PatternError};
pub use value::{Key, Mapping, Value};
