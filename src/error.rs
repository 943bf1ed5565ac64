//! Error types for the compatibility layer.

use thiserror::Error;

/// An invalid key-filter pattern, raised at filter construction time.
///
/// Only the regex filter variant can produce this; every string is a
/// valid wildcard pattern.
#[derive(Debug, Error)]
#[error("invalid regex pattern '{pattern}': {source}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self {
            pattern: pattern.into(),
            source,
        }
    }

    /// The pattern that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Errors surfaced by the BIF entry points.
#[derive(Debug, Error)]
pub enum CompatError {
    /// An invalid key-filter pattern.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// An operation the layer refuses to implement.
    #[error("{0} is a security risk and is not implemented")]
    Unsupported(&'static str),
}
