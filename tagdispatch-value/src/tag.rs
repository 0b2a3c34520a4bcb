// tagdispatch-value - Type tag with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type tags are the class labels that generic functions dispatch on.
//!
//! # Interning
//!
//! Tags are interned through a global table, so two tags with the same name
//! share one allocation. Dispatch compares a value's tags against registered
//! method tags on every call, and interning turns each of those comparisons
//! into a pointer check.
//!
//! Interned tags are never deallocated. Class names come from a bounded set
//! of model and object kinds defined by the embedding program, so the table
//! stays small in practice.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::{Result, ValueError};

/// A single dispatchable class label, such as `"rpart"` or `"numeric"`.
#[derive(Clone)]
pub struct Tag {
    name: Arc<str>,
}

/// Global tag interner
static TAG_INTERNER: OnceLock<Mutex<HashMap<Arc<str>, Arc<str>>>> = OnceLock::new();

fn intern(name: &str) -> Arc<str> {
    let mut table = TAG_INTERNER
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock();
    if let Some(existing) = table.get(name) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(name);
    table.insert(Arc::clone(&interned), Arc::clone(&interned));
    interned
}

impl Tag {
    /// Create a tag, rejecting empty names and names containing whitespace
    /// or quotes.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(ValueError::InvalidTag {
                name: name.to_string(),
                reason: "tag names cannot be empty",
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(ValueError::InvalidTag {
                name: name.to_string(),
                reason: "tag names cannot contain whitespace or quotes",
            });
        }
        Ok(Tag::interned(name))
    }

    /// Intern a name that is already known to be valid.
    pub(crate) fn interned(name: &str) -> Self {
        Tag { name: intern(name) }
    }

    /// Parse a tag from untrusted text, trimming surrounding whitespace first.
    pub fn parse(s: &str) -> Result<Self> {
        Tag::new(s.trim()).map_err(|e| match e {
            ValueError::InvalidTag { reason, .. } => ValueError::InvalidTag {
                name: s.to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Get the tag name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.name)
    }
}

impl PartialEq for Tag {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Tag {}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Tag {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Pointer hash is consistent with pointer equality for interned tags
        Arc::as_ptr(&self.name).cast::<u8>().hash(state);
    }
}

impl TryFrom<&str> for Tag {
    type Error = ValueError;

    fn try_from(name: &str) -> Result<Self> {
        Tag::new(name)
    }
}

/// Conversion into a validated [`Tag`].
///
/// Registration and class construction accept anything implementing this, so
/// callers can pass string literals or tags they already hold.
pub trait IntoTag {
    fn into_tag(self) -> Result<Tag>;
}

impl IntoTag for Tag {
    fn into_tag(self) -> Result<Tag> {
        Ok(self)
    }
}

impl IntoTag for &Tag {
    fn into_tag(self) -> Result<Tag> {
        Ok(self.clone())
    }
}

impl IntoTag for &str {
    fn into_tag(self) -> Result<Tag> {
        Tag::new(self)
    }
}

impl IntoTag for String {
    fn into_tag(self) -> Result<Tag> {
        Tag::new(&self)
    }
}

impl IntoTag for &String {
    fn into_tag(self) -> Result<Tag> {
        Tag::new(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tag() {
        let tag = Tag::new("rpart").unwrap();
        assert_eq!(tag.name(), "rpart");
        assert_eq!(format!("{}", tag), "rpart");
        assert_eq!(format!("{:?}", tag), "Tag(rpart)");
    }

    #[test]
    fn test_interning() {
        let t1 = Tag::new("gbm").unwrap();
        let t2 = Tag::new("gbm").unwrap();
        assert_eq!(t1, t2);
        assert!(Arc::ptr_eq(&t1.name, &t2.name));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Tag::new("lm").unwrap(), Tag::try_from("lm").unwrap());
        assert_ne!(Tag::new("lm").unwrap(), Tag::new("glm").unwrap());
    }

    #[test]
    fn test_ordering_is_by_name() {
        let a = Tag::new("alpha").unwrap();
        let b = Tag::new("beta").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_parse_trims() {
        let tag = Tag::parse("  randomForest ").unwrap();
        assert_eq!(tag, Tag::new("randomForest").unwrap());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            Tag::parse("   "),
            Err(ValueError::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_inner_whitespace() {
        assert!(Tag::parse("random forest").is_err());
        assert!(Tag::parse("a\"b").is_err());
    }

    #[test]
    fn test_new_rejects_invalid_names() {
        assert!(matches!(Tag::new(""), Err(ValueError::InvalidTag { .. })));
        assert!(Tag::new("x y").is_err());
        assert!(Tag::new("a\"b").is_err());
        assert!(Tag::try_from("").is_err());
    }

    #[test]
    fn test_into_tag() {
        let tag = Tag::new("gbm").unwrap();
        assert_eq!((&tag).into_tag().unwrap(), tag);
        assert_eq!("gbm".into_tag().unwrap(), tag);
        assert_eq!(String::from("gbm").into_tag().unwrap(), tag);
        assert!(String::new().into_tag().is_err());
    }

    #[test]
    fn test_parse_error_reports_raw_input() {
        match Tag::parse("  ") {
            Err(ValueError::InvalidTag { name, .. }) => assert_eq!(name, "  "),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
