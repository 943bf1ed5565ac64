//! Key filters for cache enumeration.
//!
//! Two interchangeable matching strategies, selected by a boolean flag
//! at the call site:
//! - Wildcard: `*` (any run of characters) and `?` (exactly one) are
//!   the only metacharacters, everything else matches literally
//! - Regex: the pattern is a full regular expression
//!
//! Both variants match the whole key, not a substring, and both match
//! case-insensitively - keys are case-insensitive identifiers, so a
//! case-sensitive filter could never match them coherently.

use regex::{Regex, RegexBuilder};

use crate::error::PatternError;

/// A predicate over candidate cache keys.
///
/// The variant set is closed: callers only ever select by the
/// `use_regex` flag, so there is no open extension point.
#[derive(Debug, Clone)]
pub enum KeyFilter {
    Wildcard(WildcardFilter),
    Regex(RegexFilter),
}

impl KeyFilter {
    /// Build a wildcard filter. Cannot fail.
    pub fn wildcard(pattern: &str) -> Self {
        Self::Wildcard(WildcardFilter::new(pattern))
    }

    /// Build a regex filter. Fails fast on an invalid pattern.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::Regex(RegexFilter::new(pattern)?))
    }

    /// Build the variant selected by `use_regex`.
    pub fn from_pattern(pattern: &str, use_regex: bool) -> Result<Self, PatternError> {
        if use_regex {
            Self::regex(pattern)
        } else {
            Ok(Self::wildcard(pattern))
        }
    }

    /// Whether `key` matches the pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Wildcard(filter) => filter.matches(key),
            Self::Regex(filter) => filter.matches(key),
        }
    }

    /// The pattern the filter was built from.
    pub fn pattern(&self) -> &str {
        match self {
            Self::Wildcard(filter) => filter.pattern(),
            Self::Regex(filter) => filter.pattern(),
        }
    }
}

/// Wildcard matcher: `*` and `?`, compiled down to an anchored regex.
#[derive(Debug, Clone)]
pub struct WildcardFilter {
    pattern: String,
    matcher: Regex,
}

impl WildcardFilter {
    /// Compile a wildcard pattern.
    ///
    /// Any string is a valid wildcard pattern: literal runs are regex-
    /// escaped, so the built expression always compiles.
    pub fn new(pattern: &str) -> Self {
        let mut expr = String::with_capacity(pattern.len() + 2);
        expr.push('^');
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                c => {
                    let mut buf = [0u8; 4];
                    expr.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                }
            }
        }
        expr.push('$');

        let matcher = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .build()
            .expect("escaped wildcard pattern always compiles");

        Self {
            pattern: pattern.to_string(),
            matcher,
        }
    }

    /// Whether `key` matches the whole pattern.
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    /// The original wildcard pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Regex matcher over the entire key.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    pattern: String,
    matcher: Regex,
}

impl RegexFilter {
    /// Compile a regex pattern, anchored at both ends.
    ///
    /// An invalid pattern fails here, at construction, rather than
    /// silently matching nothing or everything at enumeration time.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let matcher = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::new(pattern, source))?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// Whether `key` matches the whole pattern.
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    /// The original regex pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_match_all() {
        let filter = KeyFilter::wildcard("*");
        assert!(filter.matches("anything"));
        assert!(filter.matches("a"));
    }

    #[test]
    fn test_wildcard_exact_match_is_case_insensitive() {
        let filter = KeyFilter::wildcard("abc");
        assert!(filter.matches("abc"));
        assert!(filter.matches("ABC"));
        assert!(!filter.matches("abcd"));
        assert!(!filter.matches("xabc"));
    }

    #[test]
    fn test_wildcard_question_mark() {
        let filter = KeyFilter::wildcard("a?c");
        assert!(filter.matches("abc"));
        assert!(filter.matches("aXc"));
        assert!(!filter.matches("ac"));
        assert!(!filter.matches("abbc"));
    }

    #[test]
    fn test_wildcard_prefix() {
        let filter = KeyFilter::wildcard("al*");
        assert!(filter.matches("alpha"));
        assert!(filter.matches("album"));
        assert!(!filter.matches("beta"));
    }

    #[test]
    fn test_wildcard_escapes_regex_metacharacters() {
        let filter = KeyFilter::wildcard("a.b");
        assert!(filter.matches("a.b"));
        assert!(!filter.matches("aXb"));

        let filter = KeyFilter::wildcard("a[1]*");
        assert!(filter.matches("a[1]xyz"));
    }

    #[test]
    fn test_regex_is_anchored() {
        let filter = KeyFilter::regex("^a.*c$").unwrap();
        assert!(filter.matches("abc"));
        assert!(filter.matches("aXXXc"));

        let filter = KeyFilter::regex("a.*c").unwrap();
        assert!(!filter.matches("xabcx"));
    }

    #[test]
    fn test_invalid_regex_fails_at_construction() {
        let err = KeyFilter::regex("[").unwrap_err();
        assert_eq!(err.pattern(), "[");
    }

    #[test]
    fn test_from_pattern_selects_variant() {
        assert!(matches!(
            KeyFilter::from_pattern("a*", false).unwrap(),
            KeyFilter::Wildcard(_)
        ));
        assert!(matches!(
            KeyFilter::from_pattern("a.*", true).unwrap(),
            KeyFilter::Regex(_)
        ));
    }

    #[test]
    fn test_filter_is_reusable() {
        let filter = KeyFilter::wildcard("key?");
        for _ in 0..3 {
            assert!(filter.matches("key1"));
            assert!(!filter.matches("key"));
        }
    }
}
