// tagdispatch-value - Values and type tags for tagdispatch
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # tagdispatch-value
//!
//! The values generic functions dispatch on, and the type tag extractor that
//! gives every value its ordered class vector.

pub mod class;
pub mod error;
pub mod tag;
pub mod value;

pub use class::{ClassVector, tags_of};
pub use error::{Result, ValueError};
pub use im::{OrdMap, Vector};
pub use tag::{IntoTag, Tag};
pub use value::{Object, Value};
