// tagdispatch-core - Method registry
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The method registry: generic function name -> class tag -> handler.
//!
//! Each generic function owns a method table keyed by tag plus an optional
//! default method. Lookup walks a value's class vector in order and returns the
//! first tag with a binding, falling back to the default.
//!
//! Tables are persistent maps, so cloning a registry is cheap and the clone
//! is an independent snapshot.

use std::fmt;

use im::OrdMap;
use tagdispatch_value::{IntoTag, Tag, Value};

use crate::error::Result;
use crate::method::{Method, MethodCall};

// ============================================================================
// Resolution
// ============================================================================

/// Which binding a lookup selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A class method, matched on `tag` at `position` in the class vector
    Method { tag: Tag, position: usize },
    /// The generic's default method
    Default,
}

impl Resolution {
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Resolution::Default)
    }

    /// The matched tag, `None` for the default method.
    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Resolution::Method { tag, .. } => Some(tag),
            Resolution::Default => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Method { tag, .. } => write!(f, "method for class \"{}\"", tag),
            Resolution::Default => write!(f, "default method"),
        }
    }
}

/// A successful lookup: the handler to run and how it was found.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub method: Method,
    pub resolution: Resolution,
}

// ============================================================================
// Generic functions
// ============================================================================

/// A named generic function: its class methods and optional default.
#[derive(Clone)]
pub struct GenericFunction {
    name: String,
    methods: OrdMap<Tag, Method>,
    default: Option<Method>,
}

impl GenericFunction {
    /// Create a generic function with no methods.
    pub fn new(name: impl Into<String>) -> Self {
        GenericFunction {
            name: name.into(),
            methods: OrdMap::new(),
            default: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Method bound to exactly `tag`.
    #[must_use]
    pub fn get(&self, tag: &Tag) -> Option<&Method> {
        self.methods.get(tag)
    }

    #[must_use]
    pub fn default_method(&self) -> Option<&Method> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Tags with a class method, in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.methods.keys()
    }

    /// Number of class methods, not counting the default.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True when there are no class methods and no default.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.default.is_none()
    }

    /// First binding for `tags[start..]`, else the default.
    fn lookup_from(&self, tags: &[Tag], start: usize) -> Option<Resolved> {
        for (position, tag) in tags.iter().enumerate().skip(start) {
            if let Some(method) = self.methods.get(tag) {
                return Some(Resolved {
                    method: method.clone(),
                    resolution: Resolution::Method {
                        tag: tag.clone(),
                        position,
                    },
                });
            }
        }
        self.default.as_ref().map(|method| Resolved {
            method: method.clone(),
            resolution: Resolution::Default,
        })
    }
}

impl fmt::Debug for GenericFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericFunction")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("default", &self.default.is_some())
            .finish()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Table of generic functions and their methods.
///
/// Mutation takes `&mut self`. Build the registry during setup, then hand it
/// to a [`Dispatcher`](crate::Dispatcher), which only reads it. Use
/// [`SharedRegistry`](crate::SharedRegistry) when methods must be added while
/// other threads dispatch.
#[derive(Clone, Default)]
pub struct MethodRegistry {
    generics: OrdMap<String, GenericFunction>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        MethodRegistry {
            generics: OrdMap::new(),
        }
    }

    fn generic_mut(&mut self, generic: &str) -> &mut GenericFunction {
        self.generics
            .entry(generic.to_string())
            .or_insert_with(|| GenericFunction::new(generic))
    }

    /// Bind `handler` to `tag` under `generic`, replacing any existing binding.
    ///
    /// Returns the replaced method, if any. An invalid tag name fails with
    /// [`Error::Value`](crate::Error::Value) and leaves the registry unchanged.
    pub fn register<F>(
        &mut self,
        generic: &str,
        tag: impl IntoTag,
        handler: F,
    ) -> Result<Option<Method>>
    where
        F: Fn(&MethodCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.register_method(generic, tag, Method::new(handler))
    }

    /// Bind an existing [`Method`] to `tag` under `generic`.
    pub fn register_method(
        &mut self,
        generic: &str,
        tag: impl IntoTag,
        method: Method,
    ) -> Result<Option<Method>> {
        let tag = tag.into_tag()?;
        Ok(self.generic_mut(generic).methods.insert(tag, method))
    }

    /// Install the default method for `generic`, replacing any previous one.
    pub fn register_default<F>(&mut self, generic: &str, handler: F) -> Option<Method>
    where
        F: Fn(&MethodCall<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.register_default_method(generic, Method::new(handler))
    }

    /// Install an existing [`Method`] as the default for `generic`.
    pub fn register_default_method(&mut self, generic: &str, method: Method) -> Option<Method> {
        self.generic_mut(generic).default.replace(method)
    }

    /// Remove the binding for `tag` under `generic`. No-op if absent.
    ///
    /// A malformed tag name can never have been bound, so it removes nothing.
    pub fn unregister(&mut self, generic: &str, tag: impl IntoTag) -> Option<Method> {
        let tag = tag.into_tag().ok()?;
        self.generics
            .get_mut(generic)
            .and_then(|g| g.methods.remove(&tag))
    }

    /// Remove the default method for `generic`. No-op if absent.
    pub fn unregister_default(&mut self, generic: &str) -> Option<Method> {
        self.generics.get_mut(generic).and_then(|g| g.default.take())
    }

    /// Remove every class method and the default for `generic`.
    ///
    /// Returns how many bindings were removed. The generic itself stays known.
    pub fn clear_methods(&mut self, generic: &str) -> usize {
        match self.generics.get_mut(generic) {
            Some(g) => {
                let removed = g.methods.len() + usize::from(g.default.is_some());
                g.methods = OrdMap::new();
                g.default = None;
                removed
            }
            None => 0,
        }
    }

    /// Forget `generic` entirely.
    pub fn remove_generic(&mut self, generic: &str) -> Option<GenericFunction> {
        self.generics.remove(generic)
    }

    /// Find the handler for a class vector: first tag with a binding wins,
    /// then the default. `None` means neither exists.
    #[must_use]
    pub fn lookup(&self, generic: &str, tags: &[Tag]) -> Option<Resolved> {
        self.lookup_from(generic, tags, 0)
    }

    /// Like [`MethodRegistry::lookup`] but only considers `tags[start..]`.
    ///
    /// Positions in the returned resolution index the full slice.
    #[must_use]
    pub fn lookup_from(&self, generic: &str, tags: &[Tag], start: usize) -> Option<Resolved> {
        self.generics.get(generic)?.lookup_from(tags, start)
    }

    /// Method bound to exactly `tag`, ignoring the default.
    #[must_use]
    pub fn get_method(&self, generic: &str, tag: &Tag) -> Option<&Method> {
        self.generics.get(generic)?.get(tag)
    }

    #[must_use]
    pub fn default_method(&self, generic: &str) -> Option<&Method> {
        self.generics.get(generic)?.default_method()
    }

    #[must_use]
    pub fn contains(&self, generic: &str, tag: &Tag) -> bool {
        self.get_method(generic, tag).is_some()
    }

    #[must_use]
    pub fn generic(&self, name: &str) -> Option<&GenericFunction> {
        self.generics.get(name)
    }

    /// Tags with a class method under `generic`, sorted.
    #[must_use]
    pub fn methods(&self, generic: &str) -> Vec<Tag> {
        self.generics
            .get(generic)
            .map(|g| g.tags().cloned().collect())
            .unwrap_or_default()
    }

    /// Names of all known generics, sorted.
    #[must_use]
    pub fn generics(&self) -> Vec<&str> {
        self.generics.keys().map(String::as_str).collect()
    }

    /// Number of known generics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generics.is_empty()
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<MethodRegistry: {} generics>", self.generics.len())
    }
}
