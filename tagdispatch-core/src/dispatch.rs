// tagdispatch-core - Dispatcher
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Resolving and invoking the method for a value.
//!
//! Dispatch is a pure lookup-and-invoke per call: extract the value's class
//! vector, find the first tag with a binding (or the default), run it. The
//! dispatcher owns a snapshot of the registry and never mutates it.

use tagdispatch_value::{ClassVector, Value, tags_of};

use crate::error::{Error, Result};
use crate::method::MethodCall;
use crate::registry::{MethodRegistry, Resolution, Resolved};

// ============================================================================
// Configuration
// ============================================================================

/// What to do when only the default method matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultPolicy {
    /// Run the default method.
    #[default]
    Invoke,
    /// Fail with [`Error::DefaultRejected`] without running the default.
    Reject,
}

/// Dispatcher settings.
#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    pub default_policy: DefaultPolicy,
}

impl DispatchConfig {
    /// Configuration that refuses default-method fallbacks.
    #[must_use]
    pub fn strict() -> Self {
        DispatchConfig {
            default_policy: DefaultPolicy::Reject,
        }
    }

    #[must_use]
    pub fn with_default_policy(mut self, policy: DefaultPolicy) -> Self {
        self.default_policy = policy;
        self
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// The result of a dispatch along with the binding that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub value: Value,
    pub resolution: Resolution,
}

impl Dispatched {
    /// True when the default method produced the value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.resolution.is_default()
    }
}

/// Resolves generic function calls against a read-only registry.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: MethodRegistry,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default configuration.
    pub fn new(registry: MethodRegistry) -> Self {
        Dispatcher {
            registry,
            config: DispatchConfig::default(),
        }
    }

    pub fn with_config(registry: MethodRegistry, config: DispatchConfig) -> Self {
        Dispatcher { registry, config }
    }

    #[must_use]
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Give the registry back, e.g. to extend it and build a new dispatcher.
    #[must_use]
    pub fn into_registry(self) -> MethodRegistry {
        self.registry
    }

    /// Report which binding `generic` would run for `value`, without running it.
    pub fn resolve(&self, generic: &str, value: &Value) -> Result<Resolution> {
        let class = tags_of(value);
        let resolved = self.lookup(generic, &class)?;
        self.check_policy(generic, &class, &resolved.resolution)?;
        Ok(resolved.resolution)
    }

    /// Call `generic` on `value` with extra `args` and return the handler's result.
    ///
    /// Fails with [`Error::NoMethod`] when neither a class method nor a default
    /// exists. Handler errors are returned unchanged.
    pub fn dispatch(&self, generic: &str, value: &Value, args: &[Value]) -> Result<Value> {
        self.dispatch_traced(generic, value, args)
            .map(|dispatched| dispatched.value)
    }

    /// Like [`Dispatcher::dispatch`] but also reports the resolution.
    pub fn dispatch_traced(
        &self,
        generic: &str,
        value: &Value,
        args: &[Value],
    ) -> Result<Dispatched> {
        let class = tags_of(value);
        let resolved = self.lookup(generic, &class)?;
        self.invoke(generic, value, args, &class, resolved)
    }

    fn lookup(&self, generic: &str, class: &ClassVector) -> Result<Resolved> {
        self.registry
            .lookup(generic, class.as_slice())
            .ok_or_else(|| Error::NoMethod {
                generic: generic.to_string(),
                class: class.clone(),
            })
    }

    fn check_policy(
        &self,
        generic: &str,
        class: &ClassVector,
        resolution: &Resolution,
    ) -> Result<()> {
        if resolution.is_default() && self.config.default_policy == DefaultPolicy::Reject {
            return Err(Error::DefaultRejected {
                generic: generic.to_string(),
                class: class.clone(),
            });
        }
        Ok(())
    }

    /// Run an already-resolved method.
    pub(crate) fn invoke(
        &self,
        generic: &str,
        value: &Value,
        args: &[Value],
        class: &ClassVector,
        resolved: Resolved,
    ) -> Result<Dispatched> {
        self.check_policy(generic, class, &resolved.resolution)?;
        let call = MethodCall {
            dispatcher: self,
            generic,
            value,
            args,
            class,
            resolution: resolved.resolution,
        };
        let result = resolved.method.call(&call)?;
        Ok(Dispatched {
            value: result,
            resolution: call.resolution,
        })
    }
}
