//! # Instance Paths
//!
//! A validation engine locates a violation with a JSON Pointer
//! (RFC 6901) into the document, e.g. `/0/transformations/0/site/0`.
//! [`InstancePath`] parses that pointer once into typed segments so that the
//! catalog traversal policies consume `Index`/`Field` values directly
//! instead of splitting strings and tracking parity by hand.
//!
//! The raw pointer text is kept alongside the segments: some resolvers fall
//! back to printing it verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step in an instance path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array position.
    Index(usize),
    /// Object field name.
    Field(String),
}

impl PathSegment {
    /// Classify one unescaped pointer token.
    ///
    /// A token of ASCII digits without a leading zero (or exactly `"0"`) that
    /// fits in `usize` is an index; anything else is a field name.
    pub fn from_token(token: &str) -> Self {
        let canonical_digits = !token.is_empty()
            && token.bytes().all(|b| b.is_ascii_digit())
            && (token == "0" || !token.starts_with('0'));
        if canonical_digits {
            if let Ok(index) = token.parse::<usize>() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Field(token.to_string())
    }

    /// The segment as an array index, if it is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Field(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Field(name) => f.write_str(name),
        }
    }
}

/// A parsed violation locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InstancePath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// Parse a JSON Pointer.
    ///
    /// The empty pointer addresses the document root and has no segments.
    /// A pointer that does not start with `/` is treated as if it did, so
    /// `a/b` and `/a/b` parse the same way. Escapes `~1` and `~0` decode to
    /// `/` and `~`.
    pub fn parse(pointer: &str) -> Self {
        let body = pointer.strip_prefix('/').unwrap_or(pointer);
        let segments = if pointer.is_empty() {
            Vec::new()
        } else {
            body.split('/')
                .map(|token| PathSegment::from_token(&unescape(token)))
                .collect()
        };
        Self {
            raw: pointer.to_string(),
            segments,
        }
    }

    /// The pointer text this path was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Typed segments, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Segment at `position`, if present.
    pub fn get(&self, position: usize) -> Option<&PathSegment> {
        self.segments.get(position)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root pointer.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
