//! Tolerant dotted-path resolution over nested mappings.
//!
//! Reproduces the Adobe-era `structGet` contract: resolution never
//! fails, and missing segments are created on the way down so that
//! later accesses through the same path succeed. Callers migrated from
//! the legacy runtime rely on both halves of that - the absence of
//! errors and the mutation.

use tracing::debug;

use super::Value;

/// Split a dotted path into its segments.
///
/// An empty path or a path with an empty segment (`"a..b"`, a leading
/// or trailing dot) is a resolution failure, reported as `None`.
fn split_path(path: &str) -> Option<Vec<&str>> {
    if path.is_empty() {
        return None;
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Resolve a dotted path against a root value.
///
/// The first segment names the root itself - the caller has already
/// resolved it - and the walk covers the remaining segments, matched
/// case-insensitively. Missing segments are auto-created as empty
/// structs in place, all the way through the final one. A non-struct
/// anywhere along the way (the root included) ends resolution with a
/// fresh empty struct and no further mutation.
///
/// This is a total operation: every input produces a value, never an
/// error.
pub fn resolve(root: &Value, path: &str) -> Value {
    let Some(segments) = split_path(path) else {
        return Value::empty_struct();
    };

    let Value::Struct(root_map) = root else {
        // Nothing to descend into and nothing to mutate.
        return Value::empty_struct();
    };

    let mut current = Value::Struct(root_map.clone());
    for segment in &segments[1..] {
        let Value::Struct(map) = current else {
            // A scalar in the middle of the path blocks the walk. The
            // scalar stays untouched.
            return Value::empty_struct();
        };
        current = map.get_or_insert_with(segment, || {
            debug!("Auto-creating missing path segment '{}'", segment);
            Value::empty_struct()
        });
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Mapping;

    fn struct_at(root: &Mapping, key: &str) -> Mapping {
        root.get(key).and_then(|v| v.as_struct()).unwrap()
    }

    #[test]
    fn test_existing_path_returns_terminal_value() {
        let root = Mapping::new();
        let foo = Mapping::new();
        foo.insert("bar", Value::from("baz"));
        root.insert("foo", Value::Struct(foo));

        let result = resolve(&Value::Struct(root.clone()), "myStruct.foo.bar");

        assert_eq!(result, Value::from("baz"));
        // A fully pre-existing path mutates nothing.
        assert_eq!(struct_at(&root, "foo").len(), 1);
    }

    #[test]
    fn test_missing_segments_are_created() {
        let root = Mapping::new();

        let result = resolve(&Value::Struct(root.clone()), "ref.a.b.c");

        let a = struct_at(&root, "a");
        let b = struct_at(&a, "b");
        assert!(b.contains_key("c"));

        // The returned struct IS the vivified leaf, not a copy of it.
        let c = b.get("c").and_then(|v| v.as_struct()).unwrap();
        assert!(result.as_struct().unwrap().same_table(&c));
        assert!(c.is_empty());
    }

    #[test]
    fn test_partial_path_vivifies_from_missing_segment() {
        let root = Mapping::new();
        let foo = Mapping::new();
        foo.insert("bar", Value::from("baz"));
        root.insert("foo", Value::Struct(foo));

        let result = resolve(&Value::Struct(root.clone()), "myStruct.foo.blah.blerge");

        assert_eq!(result, Value::empty_struct());

        let foo = struct_at(&root, "foo");
        assert_eq!(foo.get("bar"), Some(Value::from("baz")));
        let blah = struct_at(&foo, "blah");
        assert!(blah.contains_key("blerge"));
    }

    #[test]
    fn test_scalar_blocks_walk_without_overwrite() {
        let root = Mapping::new();
        root.insert("foo", Value::from("scalar"));

        let result = resolve(&Value::Struct(root.clone()), "s.foo.deeper");

        assert_eq!(result, Value::empty_struct());
        assert_eq!(root.get("foo"), Some(Value::from("scalar")));
    }

    #[test]
    fn test_non_struct_root() {
        let result = resolve(&Value::from("just a string"), "myStruct.foo.bar.baz");
        assert_eq!(result, Value::empty_struct());

        let result = resolve(&Value::Number(3.0), "x");
        assert_eq!(result, Value::empty_struct());
    }

    #[test]
    fn test_single_segment_returns_root() {
        let root = Mapping::new();
        root.insert("k", Value::Bool(true));

        let result = resolve(&Value::Struct(root.clone()), "myStruct");

        assert!(result.as_struct().unwrap().same_table(&root));
    }

    #[test]
    fn test_segments_match_case_insensitively() {
        let root = Mapping::new();
        let inner = Mapping::new();
        inner.insert("Deep", Value::Number(7.0));
        root.insert("Inner", Value::Struct(inner));

        let result = resolve(&Value::Struct(root.clone()), "s.INNER.deep");

        assert_eq!(result, Value::Number(7.0));
        // Case-folded hit, so nothing new was created.
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_malformed_path_is_not_found() {
        let root = Mapping::new();

        assert_eq!(resolve(&Value::Struct(root.clone()), ""), Value::empty_struct());
        assert_eq!(resolve(&Value::Struct(root.clone()), "a..b"), Value::empty_struct());
        assert_eq!(resolve(&Value::Struct(root.clone()), "a.b."), Value::empty_struct());

        // A malformed path fails before the walk starts: no mutation.
        assert!(root.is_empty());
    }
}
