// tagdispatch-core - Shared, lock-guarded registry
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! A registry that several threads can register into and dispatch through.
//!
//! One `RwLock` guards the whole table. Dispatch never holds the lock while a
//! handler runs: it takes a snapshot (a cheap persistent-map clone) under the
//! read lock and dispatches against that, so handlers may register methods
//! without deadlocking.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tagdispatch_value::{IntoTag, Tag, Value};

use crate::dispatch::{DispatchConfig, Dispatcher};
use crate::error::Result;
use crate::method::{Method, MethodCall};
use crate::registry::{MethodRegistry, Resolved};

/// A cloneable handle to a lock-guarded [`MethodRegistry`].
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<MethodRegistry>>,
}

impl SharedRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an already-built registry.
    pub fn from_registry(registry: MethodRegistry) -> Self {
        SharedRegistry {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register<F>(
        &self,
        generic: &str,
        tag: impl IntoTag,
        handler: F,
    ) -> Result<Option<Method>>
    where
        F: Fn(&MethodCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.inner.write().register(generic, tag, handler)
    }

    pub fn register_method(
        &self,
        generic: &str,
        tag: impl IntoTag,
        method: Method,
    ) -> Result<Option<Method>> {
        self.inner.write().register_method(generic, tag, method)
    }

    pub fn register_default<F>(&self, generic: &str, handler: F) -> Option<Method>
    where
        F: Fn(&MethodCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.inner.write().register_default(generic, handler)
    }

    pub fn unregister(&self, generic: &str, tag: impl IntoTag) -> Option<Method> {
        self.inner.write().unregister(generic, tag)
    }

    pub fn unregister_default(&self, generic: &str) -> Option<Method> {
        self.inner.write().unregister_default(generic)
    }

    pub fn clear_methods(&self, generic: &str) -> usize {
        self.inner.write().clear_methods(generic)
    }

    #[must_use]
    pub fn lookup(&self, generic: &str, tags: &[Tag]) -> Option<Resolved> {
        self.inner.read().lookup(generic, tags)
    }

    #[must_use]
    pub fn methods(&self, generic: &str) -> Vec<Tag> {
        self.inner.read().methods(generic)
    }

    /// Copy of the current registry state. Later registrations do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> MethodRegistry {
        self.inner.read().clone()
    }

    /// Freeze the current state into a read-only dispatcher.
    #[must_use]
    pub fn dispatcher(&self, config: DispatchConfig) -> Dispatcher {
        Dispatcher::with_config(self.snapshot(), config)
    }

    /// Dispatch against the current state with the default configuration.
    pub fn dispatch(&self, generic: &str, value: &Value, args: &[Value]) -> Result<Value> {
        self.dispatcher(DispatchConfig::default())
            .dispatch(generic, value, args)
    }
}

/// Process-wide registry
static GLOBAL_REGISTRY: OnceLock<SharedRegistry> = OnceLock::new();

/// The process-wide registry, created empty on first use.
pub fn global() -> &'static SharedRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedRegistry::new)
}
