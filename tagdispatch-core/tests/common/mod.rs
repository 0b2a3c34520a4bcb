// tagdispatch-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for tagdispatch integration tests.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`classed`] - Build a field-less object from a list of tags
//! - [`constant`] - A handler returning a fixed value
//! - [`counting`] - A handler that counts its invocations
//! - [`scenario_registry`] - The alpha/default registry used by the scenario tests
//!
//! # Macros
//!
//! - [`assert_dispatch!`] - Assert that a dispatch returns an expected value
//! - [`assert_dispatch_err!`] - Assert that a dispatch fails with a given error variant

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[allow(unused_imports)]
pub use tagdispatch_core::{
    ClassVector, DefaultPolicy, DispatchConfig, Dispatched, Dispatcher, Error, Method,
    MethodCall, MethodRegistry, Resolution, Result, SharedRegistry, Tag, Value, ValueError,
};

/// Build an object carrying `tags` as its class vector and no fields.
///
/// # Panics
///
/// Panics if `tags` is empty.
#[must_use]
#[allow(dead_code)]
pub fn classed(tags: &[&str]) -> Value {
    Value::classed(ClassVector::new(tags.iter().copied()).expect("non-empty class"))
}

/// A handler that always returns `value`.
#[must_use]
#[allow(dead_code)]
pub fn constant(value: Value) -> Method {
    Method::new(move |_| Ok(value.clone()))
}

/// A handler that returns `value` and bumps `counter` on every call.
#[must_use]
#[allow(dead_code)]
pub fn counting(counter: &Arc<AtomicUsize>, value: Value) -> Method {
    let counter = Arc::clone(counter);
    Method::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value.clone())
    })
}

/// Read a counter created for [`counting`].
#[must_use]
#[allow(dead_code)]
pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// `"alpha"` returns 1, the default returns -1, under the generic `"score"`.
#[must_use]
#[allow(dead_code)]
pub fn scenario_registry() -> MethodRegistry {
    let mut registry = MethodRegistry::new();
    registry.register("score", "alpha", |_| Ok(Value::Integer(1))).unwrap();
    registry.register_default("score", |_| Ok(Value::Integer(-1)));
    registry
}

/// Assert that dispatching `generic` on `value` returns `expected`.
///
/// # Example
///
/// ```ignore
/// assert_dispatch!(dispatcher, "score", classed(&["alpha"]), Value::Integer(1));
/// ```
#[macro_export]
macro_rules! assert_dispatch {
    ($dispatcher:expr, $generic:expr, $value:expr, $expected:expr) => {
        let result = $dispatcher.dispatch($generic, &$value, &[]);
        assert!(
            result.is_ok(),
            "Failed to dispatch '{}': {:?}",
            $generic,
            result.as_ref().err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Dispatch of '{}' did not match expected",
            $generic
        );
    };
}

/// Assert that dispatching `generic` on `value` fails with an error matching `pattern`.
///
/// # Example
///
/// ```ignore
/// assert_dispatch_err!(dispatcher, "score", classed(&["gamma"]), Error::NoMethod { .. });
/// ```
#[macro_export]
macro_rules! assert_dispatch_err {
    ($dispatcher:expr, $generic:expr, $value:expr, $pattern:pat) => {
        let result = $dispatcher.dispatch($generic, &$value, &[]);
        assert!(
            matches!(result, Err($pattern)),
            "Expected {} for '{}' but got {:?}",
            stringify!($pattern),
            $generic,
            result
        );
    };
}
