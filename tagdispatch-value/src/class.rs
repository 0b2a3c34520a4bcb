// tagdispatch-value - Class vectors and type tag extraction
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Class vectors: the ordered tag sequence a value dispatches on.
//!
//! Every value has a non-empty class vector, most specific tag first. Classed
//! objects carry theirs explicitly; basic values get a single implicit tag
//! from their variant. The universal "any object" tag is never stored: the
//! default method of a generic function plays that role.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ValueError};
use crate::tag::{IntoTag, Tag};
use crate::value::Value;

/// Implicit class of `Value::Null`.
pub const NULL_CLASS: &str = "NULL";
/// Implicit class of `Value::Logical`.
pub const LOGICAL_CLASS: &str = "logical";
/// Implicit class of `Value::Integer`.
pub const INTEGER_CLASS: &str = "integer";
/// Implicit class of `Value::Double`.
pub const NUMERIC_CLASS: &str = "numeric";
/// Implicit class of `Value::Character`.
pub const CHARACTER_CLASS: &str = "character";
/// Implicit class of `Value::List`.
pub const LIST_CLASS: &str = "list";

/// An immutable, non-empty, ordered sequence of type tags.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClassVector {
    tags: Arc<[Tag]>,
}

impl ClassVector {
    /// Build a class vector from tags, most specific first.
    ///
    /// Fails with [`ValueError::EmptyClass`] when no tags are supplied, and
    /// with [`ValueError::InvalidTag`] for the first malformed name.
    pub fn new<I, T>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoTag,
    {
        let tags = tags
            .into_iter()
            .map(IntoTag::into_tag)
            .collect::<Result<Vec<_>>>()?;
        if tags.is_empty() {
            return Err(ValueError::EmptyClass);
        }
        Ok(ClassVector { tags: tags.into() })
    }

    /// Parse a comma-separated class list such as `"randomForest.formula,randomForest"`.
    pub fn parse(s: &str) -> Result<Self> {
        let tags = s
            .split(',')
            .map(Tag::parse)
            .collect::<Result<Vec<_>>>()?;
        ClassVector::new(tags)
    }

    /// A class vector holding exactly one tag.
    pub fn single(tag: Tag) -> Self {
        ClassVector {
            tags: Arc::from([tag]),
        }
    }

    /// The first (most specific) tag.
    #[must_use]
    pub fn most_specific(&self) -> &Tag {
        // Non-empty by construction
        &self.tags[0]
    }

    /// True if `tag` appears anywhere in the vector.
    #[must_use]
    pub fn inherits(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Index of `tag` in the vector, if present.
    #[must_use]
    pub fn position(&self, tag: &Tag) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl<'a> IntoIterator for &'a ClassVector {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl fmt::Display for ClassVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.len() == 1 {
            return write!(f, "\"{}\"", self.tags[0]);
        }
        write!(f, "c(")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\"", tag)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for ClassVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tags.iter()).finish()
    }
}

fn implicit(name: &str) -> ClassVector {
    ClassVector::single(Tag::interned(name))
}

/// Extract the ordered type tags of a value, most specific first.
///
/// Deterministic and side-effect free. Basic values yield a single implicit
/// tag; classed objects yield their explicit class vector.
pub fn tags_of(value: &Value) -> ClassVector {
    match value {
        Value::Null => implicit(NULL_CLASS),
        Value::Logical(_) => implicit(LOGICAL_CLASS),
        Value::Integer(_) => implicit(INTEGER_CLASS),
        Value::Double(_) => implicit(NUMERIC_CLASS),
        Value::Character(_) => implicit(CHARACTER_CLASS),
        Value::List(_) => implicit(LIST_CLASS),
        Value::Object(obj) => obj.class().clone(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tags_have_length_one() {
        assert_eq!(tags_of(&Value::Double(1.5)).len(), 1);
        assert_eq!(tags_of(&Value::Integer(3)).len(), 1);
        assert_eq!(tags_of(&Value::Null).len(), 1);
    }

    #[test]
    fn test_implicit_classes() {
        assert_eq!(
            tags_of(&Value::Double(2.0)).most_specific(),
            &Tag::new("numeric").unwrap()
        );
        assert_eq!(
            tags_of(&Value::string("x")).most_specific(),
            &Tag::new("character").unwrap()
        );
        assert_eq!(
            tags_of(&Value::Logical(true)).most_specific(),
            &Tag::new("logical").unwrap()
        );
        assert_eq!(
            tags_of(&Value::list(vec![])).most_specific(),
            &Tag::new("list").unwrap()
        );
    }

    #[test]
    fn test_object_tags_keep_order() {
        let class = ClassVector::new(["randomForest.formula", "randomForest"]).unwrap();
        let value = Value::classed(class.clone());
        let tags = tags_of(&value);
        assert_eq!(tags, class);
        assert_eq!(tags.most_specific(), &Tag::new("randomForest.formula").unwrap());
        assert_eq!(tags.position(&Tag::new("randomForest").unwrap()), Some(1));
    }

    #[test]
    fn test_tags_of_is_deterministic() {
        let value = Value::classed(ClassVector::new(["rpart", "model"]).unwrap());
        assert_eq!(tags_of(&value), tags_of(&value));
    }

    #[test]
    fn test_empty_class_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(ClassVector::new(empty), Err(ValueError::EmptyClass));
    }

    #[test]
    fn test_parse_comma_list() {
        let class = ClassVector::parse("gbm, model").unwrap();
        assert_eq!(class.len(), 2);
        assert!(class.inherits(&Tag::new("model").unwrap()));
        assert!(!class.inherits(&Tag::new("lm").unwrap()));
    }

    #[test]
    fn test_parse_rejects_blank_entry() {
        assert!(ClassVector::parse("gbm,,model").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ClassVector::single(Tag::new("lm").unwrap()).to_string(), "\"lm\"");
        assert_eq!(
            ClassVector::new(["rpart", "model"]).unwrap().to_string(),
            "c(\"rpart\", \"model\")"
        );
    }

    #[test]
    fn test_invalid_tags_rejected() {
        assert!(matches!(
            ClassVector::new([""]),
            Err(ValueError::InvalidTag { .. })
        ));
        assert!(ClassVector::new(["rpart", "a\"b"]).is_err());
        assert!(ClassVector::new(["x y"]).is_err());
    }
}
