// tagdispatch-core - Generic function registry and dispatcher
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # tagdispatch-core
//!
//! Single-dispatch generic functions. Handlers are registered explicitly per
//! (generic name, class tag) pair, with an optional default per generic, and
//! a dispatcher picks the handler for a value from its class vector.
//!
//! ```rust
//! use tagdispatch_core::{Dispatcher, MethodRegistry};
//! use tagdispatch_value::{ClassVector, Value};
//!
//! let mut registry = MethodRegistry::new();
//! registry
//!     .register("describe", "rpart", |_| Ok(Value::from("decision tree")))
//!     .unwrap();
//! registry.register_default("describe", |call| {
//!     Ok(Value::from(format!("no describe method for class {}", call.class())))
//! });
//!
//! let dispatcher = Dispatcher::new(registry);
//! let tree = Value::classed(ClassVector::new(["rpart", "model"]).unwrap());
//! assert_eq!(
//!     dispatcher.dispatch("describe", &tree, &[]).unwrap(),
//!     Value::from("decision tree")
//! );
//! ```

pub mod dispatch;
pub mod error;
pub mod method;
pub mod registry;
pub mod shared;

pub use dispatch::{DefaultPolicy, DispatchConfig, Dispatched, Dispatcher};
pub use error::{Error, Result};
pub use method::{HandlerFn, Method, MethodCall};
pub use registry::{GenericFunction, MethodRegistry, Resolution, Resolved};
pub use shared::{SharedRegistry, global};

// Re-export value types for convenience
pub use tagdispatch_value::{ClassVector, IntoTag, Object, Tag, Value, ValueError, tags_of};
