// tagdispatch-value - Error types for value construction
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Errors raised while building tags, class vectors and objects.

use thiserror::Error;

/// Result type for value construction.
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors that can occur while constructing dispatchable values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A tag name failed validation
    #[error("invalid type tag '{name}': {reason}")]
    InvalidTag { name: String, reason: &'static str },
    /// An object was given an empty class vector
    #[error("class vector must contain at least one tag")]
    EmptyClass,
}
