//! Path types

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Object field name
    Key(String),
    /// Array position
    Index(usize),
    /// Scalar element of an array compared as a set, named by its compact
    /// JSON text (strings keep their quotes)
    Member(String),
}

impl Segment {
    fn write_canonical(&self, out: &mut String, first: bool) {
        match self {
            Segment::Key(name) | Segment::Member(name) => {
                if !first {
                    out.push('.');
                }
                out.push_str(name);
            }
            Segment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(name) | Segment::Member(name) => write!(f, "{name}"),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Location inside a JSON document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of an object field below this one
    #[must_use]
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    /// Path of an array element below this one
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Path of a set-compared scalar element below this one
    #[must_use]
    pub fn child_member(&self, member: &JsonValue) -> Self {
        self.child(Segment::Member(member.to_string()))
    }

    /// Path with one more segment
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Path without its last segment (root stays root)
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Segments from the root down
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this is the document root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Depth below the root
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Canonical string form used as a diff key
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            segment.write_canonical(&mut out, i == 0);
        }
        out
    }

    /// Parse the canonical form back into a path.
    ///
    /// Set members cannot be told apart from keys in canonical form and
    /// parse as keys.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('$').unwrap_or(text);
        let text = text.strip_prefix('.').unwrap_or(text);

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) => digits.push(d),
                            None => return Err(Error::path(text, "unterminated index")),
                        }
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| Error::path(text, format!("malformed index '{digits}'")))?;
                    segments.push(Segment::Index(index));
                }
                other => key.push(other),
            }
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "$")
        } else {
            write!(f, "{}", self.canonical())
        }
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.segments.len()))?;
        for segment in &self.segments {
            seq.serialize_element(&segment.to_string())?;
        }
        seq.end()
    }
}
