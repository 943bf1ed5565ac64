//! Scripting value model.
//!
//! The legacy runtime's structs are associative containers with
//! case-insensitive keys and reference semantics: assigning a struct to
//! a second variable aliases the same underlying table. `Mapping`
//! reproduces that with a shared interior, so cloning is cheap and
//! mutation through any handle is visible through all of them.
//!
//! ## Types
//!
//! - `Key` - Case-insensitive identifier, original spelling preserved
//! - `Mapping` - Shared `Key -> Value` table
//! - `Value` - The scripting value enum (scalars, arrays, structs)

pub mod path;

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A case-insensitive identifier key.
///
/// The original spelling is kept for display; equality and hashing use
/// the case-folded form, so `Key::new("Foo")` and `Key::new("FOO")` are
/// the same key.
#[derive(Debug, Clone)]
pub struct Key {
    name: Arc<str>,
    folded: Arc<str>,
}

impl Key {
    /// Create a key from an identifier, folding case for comparison.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            folded: Arc::from(name.to_lowercase().as_str()),
        }
    }

    /// The key's original spelling.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A struct in the scripting sense: case-insensitive keys, shared
/// underlying table.
///
/// Cloning a `Mapping` does not copy the entries; both handles address
/// the same table. Lookups return owned `Value`s - for nested structs
/// that is another handle to the same table, so the reference semantics
/// carry through the whole tree.
#[derive(Clone, Default)]
pub struct Mapping {
    entries: Arc<RwLock<HashMap<Key, Value>>>,
}

impl Mapping {
    /// Create a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(&Key::new(key)).cloned()
    }

    /// Insert a value under `key`, returning the previous value if the
    /// key was already present (under any spelling).
    pub fn insert(&self, key: &str, value: Value) -> Option<Value> {
        self.entries.write().insert(Key::new(key), value)
    }

    /// Get the value under `key`, inserting the result of `f` first if
    /// the key is absent. Lookup and insert happen under one lock.
    pub fn get_or_insert_with<F>(&self, key: &str, f: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        self.entries.write().entry(Key::new(key)).or_insert_with(f).clone()
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(&Key::new(key))
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.write().remove(&Key::new(key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All keys in their original spelling.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().map(|k| k.as_str().to_string()).collect()
    }

    /// Snapshot of all entries. The values are clones - handles for
    /// nested structs, copies for scalars.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.clone()))
            .collect()
    }

    /// Whether two handles address the same underlying table.
    pub fn same_table(&self, other: &Mapping) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        if self.same_table(other) {
            return true;
        }
        // Snapshot first so no lock is held across the recursive compare.
        let entries = self.entries();
        if entries.len() != other.len() {
            return false;
        }
        entries.iter().all(|(k, v)| other.get(k).as_ref() == Some(v))
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        let mut map = f.debug_map();
        for (k, v) in &entries {
            map.entry(k, v);
        }
        map.finish()
    }
}

/// A scripting value: a scalar, an array, or a struct.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Struct(Mapping),
}

impl Value {
    /// A fresh empty struct value.
    pub fn empty_struct() -> Self {
        Value::Struct(Mapping::new())
    }

    /// Whether this value is a struct.
    pub fn is_struct(&self) -> bool {
        matches!(self, Value::Struct(_))
    }

    /// A handle to the struct's table, if this value is a struct.
    pub fn as_struct(&self) -> Option<Mapping> {
        match self {
            Value::Struct(map) => Some(map.clone()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Struct(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => {
                let map = Mapping::new();
                for (k, v) in fields {
                    map.insert(&k, Value::from(v));
                }
                Value::Struct(map)
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Struct(map) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in map.entries() {
                    obj.insert(k, serde_json::Value::from(&v));
                }
                serde_json::Value::Object(obj)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Struct(map) => {
                let entries = map.entries();
                let mut state = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in &entries {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from(json))
    }
}
