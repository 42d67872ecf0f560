//! # Document Nodes
//!
//! [`DataNode`] is a borrowed, read-only cursor into a parsed document. A
//! lookup that leaves the document yields the *missing* node, and every
//! lookup under a missing node is missing too. Traversal never panics.

use std::fmt;

use serde_json::Value;

use crate::path::PathSegment;

/// A position in a parsed document, or the missing sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataNode<'a>(Option<&'a Value>);

impl<'a> DataNode<'a> {
    /// Cursor at the root of `value`.
    pub fn new(value: &'a Value) -> Self {
        Self(Some(value))
    }

    /// The missing sentinel.
    pub const fn missing() -> Self {
        Self(None)
    }

    /// True if this node does not exist in the document.
    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// The underlying value, if present.
    pub fn value(&self) -> Option<&'a Value> {
        self.0
    }

    /// Look up an object field.
    ///
    /// On an array, a key that is a decimal index selects that element.
    pub fn key(&self, name: &str) -> DataNode<'a> {
        match self.0 {
            Some(Value::Object(map)) => Self(map.get(name)),
            Some(Value::Array(items)) => Self(name.parse::<usize>().ok().and_then(|i| items.get(i))),
            _ => Self::missing(),
        }
    }

    /// Look up an array element.
    ///
    /// On an object, the index is looked up as its decimal key, which is how
    /// YAML mappings with integer keys arrive after conversion.
    pub fn index(&self, index: usize) -> DataNode<'a> {
        match self.0 {
            Some(Value::Array(items)) => Self(items.get(index)),
            Some(Value::Object(map)) => Self(map.get(&index.to_string())),
            _ => Self::missing(),
        }
    }

    /// Look up one path segment.
    pub fn child(&self, segment: &PathSegment) -> DataNode<'a> {
        match segment {
            PathSegment::Index(i) => self.index(*i),
            PathSegment::Field(name) => self.key(name),
        }
    }

    /// Strict array lookup: `None` unless this node is an array holding
    /// `index`.
    pub fn element(&self, index: usize) -> Option<DataNode<'a>> {
        match self.0 {
            Some(Value::Array(items)) => items.get(index).map(DataNode::new),
            _ => None,
        }
    }
}

/// String form: raw text for strings, compact JSON for other values, `null`
/// when missing.
impl fmt::Display for DataNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{other}"),
            None => f.write_str("null"),
        }
    }
}
