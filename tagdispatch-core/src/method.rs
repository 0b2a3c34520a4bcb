// tagdispatch-core - Method handlers and call context
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Handlers bound to generic functions, and the context they run in.

use std::fmt;
use std::sync::Arc;

use tagdispatch_value::{ClassVector, Value};

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::registry::Resolution;

/// Signature shared by every handler.
pub type HandlerFn = dyn Fn(&MethodCall<'_>) -> Result<Value> + Send + Sync;

/// A handler bound to a generic function, either for a tag or as the default.
///
/// Cloning is cheap; clones refer to the same function.
#[derive(Clone)]
pub struct Method {
    func: Arc<HandlerFn>,
}

impl Method {
    /// Wrap a closure as a method.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&MethodCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Method {
            func: Arc::new(func),
        }
    }

    /// Invoke the handler. Errors are returned exactly as the handler raised them.
    pub fn call(&self, call: &MethodCall<'_>) -> Result<Value> {
        (self.func)(call)
    }

    /// True if both methods wrap the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Method {:p}>", Arc::as_ptr(&self.func).cast::<u8>())
    }
}

// ============================================================================
// Call context
// ============================================================================

/// Everything a handler can see about the call that selected it.
pub struct MethodCall<'a> {
    pub(crate) dispatcher: &'a Dispatcher,
    pub(crate) generic: &'a str,
    pub(crate) value: &'a Value,
    pub(crate) args: &'a [Value],
    pub(crate) class: &'a ClassVector,
    pub(crate) resolution: Resolution,
}

impl<'a> MethodCall<'a> {
    /// The value being dispatched on.
    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Extra arguments passed after the value.
    #[must_use]
    pub fn args(&self) -> &'a [Value] {
        self.args
    }

    /// Extra argument at `index`, or an arity error naming the generic.
    pub fn arg(&self, index: usize) -> Result<&'a Value> {
        self.args
            .get(index)
            .ok_or_else(|| Error::arity_named(self.generic, index + 1, self.args.len()))
    }

    /// Name of the generic function being dispatched.
    #[must_use]
    pub fn generic(&self) -> &'a str {
        self.generic
    }

    /// Class vector of the dispatched value.
    #[must_use]
    pub fn class(&self) -> &'a ClassVector {
        self.class
    }

    /// Which binding was selected for this call.
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Field of the dispatched object, or [`Error::MissingField`].
    pub fn field(&self, name: &str) -> Result<&'a Value> {
        self.value.field(name).ok_or_else(|| Error::MissingField {
            class: self.class.clone(),
            field: name.to_string(),
        })
    }

    /// Numeric field of the dispatched object.
    pub fn number(&self, name: &str) -> Result<f64> {
        let value = self.field(name)?;
        value
            .as_f64()
            .ok_or_else(|| Error::type_error_in(format!("field '{}'", name), "numeric", value.type_name()))
    }

    /// Continue dispatch with the tags after the one that matched, then the default.
    ///
    /// Fails with [`Error::NoNextMethod`] from the default method, or when no
    /// less specific binding exists.
    pub fn next_method(&self) -> Result<Value> {
        self.next_method_with(self.args)
    }

    /// Like [`MethodCall::next_method`] but with replacement extra arguments.
    pub fn next_method_with(&self, args: &[Value]) -> Result<Value> {
        let start = match &self.resolution {
            Resolution::Method { position, .. } => position + 1,
            Resolution::Default => return Err(self.no_next_method()),
        };
        let resolved = self
            .dispatcher
            .registry()
            .lookup_from(self.generic, self.class.as_slice(), start)
            .ok_or_else(|| self.no_next_method())?;
        self.dispatcher
            .invoke(self.generic, self.value, args, self.class, resolved)
            .map(|dispatched| dispatched.value)
    }

    fn no_next_method(&self) -> Error {
        Error::NoNextMethod {
            generic: self.generic.to_string(),
            from: self.resolution.clone(),
        }
    }
}
