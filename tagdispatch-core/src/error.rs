// tagdispatch-core - Error types for dispatch
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for method registration and dispatch.
//!
//! Two kinds of failure matter to callers. Dispatch errors
//! ([`Error::NoMethod`], [`Error::DefaultRejected`], [`Error::NoNextMethod`])
//! mean the registry has no suitable binding. Everything else is raised by
//! handlers themselves and reaches the caller exactly as the handler built it.

use tagdispatch_value::{ClassVector, ValueError};
use thiserror::Error;

use crate::registry::Resolution;

/// Result type for dispatch and handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during dispatch or inside a handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Neither a class method nor a default method is registered
    #[error("no applicable method for '{generic}' applied to an object of class {class}")]
    NoMethod {
        generic: String,
        class: ClassVector,
    },
    /// Only the default method matched and the dispatcher refuses defaults
    #[error(
        "no specific method for '{generic}' applied to an object of class {class} (default method refused)"
    )]
    DefaultRejected {
        generic: String,
        class: ClassVector,
    },
    /// `next_method` was called with nothing left to try
    #[error("no next method for '{generic}' after the {from}")]
    NoNextMethod { generic: String, from: Resolution },
    /// A handler expected a field the object does not carry
    #[error("object of class {class} has no field '{field}'")]
    MissingField { class: ClassVector, field: String },
    /// A handler received a value of the wrong type
    #[error("{context}: expected {expected}, got {got}")]
    TypeError {
        context: String,
        expected: &'static str,
        got: &'static str,
    },
    /// A handler received the wrong number of extra arguments
    #[error("wrong number of arguments to '{name}': expected {expected}, got {got}")]
    ArityError {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Free-form failure raised by a handler
    #[error("{0}")]
    Handler(String),
    /// Invalid tag or class vector
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl Error {
    /// Create a free-form handler error.
    pub fn handler(message: impl Into<String>) -> Self {
        Error::Handler(message.into())
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            context: context.into(),
            expected,
            got,
        }
    }

    /// Create an arity error for a named generic.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            name: name.into(),
            expected,
            got,
        }
    }

    /// True for errors that signal a registry gap rather than a handler failure.
    #[must_use]
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            Error::NoMethod { .. } | Error::DefaultRejected { .. } | Error::NoNextMethod { .. }
        )
    }
}
