// tagdispatch-value - Value types for tagdispatch
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type.
//!
//! `Value` covers the basic vector types of a statistical scripting language
//! plus classed objects, which is everything a generic function can be
//! called on.

use std::fmt;
use std::sync::Arc;

use im::{OrdMap, Vector};

use crate::class::{ClassVector, tags_of};
use crate::tag::Tag;

// ============================================================================
// Object
// ============================================================================

/// A classed object: a class vector plus named fields.
///
/// Objects are what model-fitting code hands back (a fitted tree, a boosted
/// ensemble, ...). Dispatch only looks at the class; handlers read fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: ClassVector,
    fields: OrdMap<String, Value>,
}

impl Object {
    /// Create an object with the given class and fields.
    pub fn new<I, K>(class: ClassVector, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Object {
            class,
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The object's class vector, most specific first.
    #[must_use]
    pub fn class(&self) -> &ClassVector {
        &self.class
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Return a copy with one field added or replaced.
    #[must_use]
    pub fn with_field(&self, name: impl Into<String>, value: Value) -> Self {
        Object {
            class: self.class.clone(),
            fields: self.fields.update(name.into(), value),
        }
    }
}

// ============================================================================
// Value
// ============================================================================

/// A dispatchable runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Logical(bool),
    Integer(i64),
    Double(f64),
    Character(Arc<str>),
    List(Vector<Value>),
    Object(Arc<Object>),
}

impl Value {
    /// Create a character value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Character(s.into())
    }

    /// Create a list value
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Create a classed object value
    pub fn object<I, K>(class: ClassVector, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(Arc::new(Object::new(class, fields)))
    }

    /// Create a classed object with no fields
    pub fn classed(class: ClassVector) -> Self {
        Value::Object(Arc::new(Object {
            class,
            fields: OrdMap::new(),
        }))
    }

    /// Return a new value carrying `class` instead of its current class.
    ///
    /// Objects keep their fields. Basic values become a classed object with
    /// the original value stored under the `.data` field. The receiver is
    /// never modified.
    #[must_use]
    pub fn with_class(&self, class: ClassVector) -> Self {
        match self {
            Value::Object(obj) => Value::Object(Arc::new(Object {
                class,
                fields: obj.fields.clone(),
            })),
            other => Value::object(class, [(".data", other.clone())]),
        }
    }

    /// The value's class vector. Shorthand for [`tags_of`].
    #[must_use]
    pub fn class(&self) -> ClassVector {
        tags_of(self)
    }

    /// True if any of the value's tags equals `tag`.
    #[must_use]
    pub fn inherits(&self, tag: &Tag) -> bool {
        match self {
            Value::Object(obj) => obj.class.inherits(tag),
            other => tags_of(other).inherits(tag),
        }
    }

    /// Field of a classed object, `None` for basic values.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.field(name))
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(&**obj),
            _ => None,
        }
    }

    /// Numeric view of integers and doubles.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Character(s) => Some(&**s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Storage type name, used in type error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Logical(_) => "logical",
            Value::Integer(_) => "integer",
            Value::Double(_) => "double",
            Value::Character(_) => "character",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Logical(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

/// Quote a string the way R prints it: non-ASCII text stays readable.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c.is_control() => write!(f, "{}", c.escape_default())?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Logical(true) => write!(f, "TRUE"),
            Value::Logical(false) => write!(f, "FALSE"),
            Value::Integer(n) => write!(f, "{}L", n),
            Value::Double(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Inf")
                    } else {
                        write!(f, "-Inf")
                    }
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Character(s) => write_quoted(f, s),
            Value::List(items) => {
                write!(f, "list(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Object(obj) => write!(f, "<{} object>", obj.class.most_specific()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
