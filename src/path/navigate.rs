//! Walking decoded documents by path

use super::types::{JsonPath, Segment};
use crate::error::{Error, Result};
use crate::types::{value_kind, JsonValue};
use std::fmt;

/// Why a path could not be followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathErrorReason {
    /// Object has no such field
    MissingKey(String),
    /// Array is shorter than the requested index
    IndexOutOfRange { index: usize, len: usize },
    /// Node is not of the kind the segment needs
    WrongKind {
        expected: &'static str,
        found: String,
    },
    /// Array schema node has no item schema yet
    NoItems,
}

impl fmt::Display for PathErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "key '{key}' does not exist"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range (len {len})")
            }
            Self::WrongKind { expected, found } => {
                let article = if expected.starts_with(&['a', 'e', 'i', 'o', 'u'][..]) {
                    "an"
                } else {
                    "a"
                };
                write!(f, "not {article} {expected} ({found})")
            }
            Self::NoItems => write!(f, "array has no item schema"),
        }
    }
}

impl PathErrorReason {
    /// Attach the location where walking stopped
    pub fn at(self, path: &JsonPath) -> Error {
        Error::path(path.to_string(), self.to_string())
    }
}

/// Follow `path` from `value` down to the node it addresses.
///
/// `Member` segments select the scalar element whose compact JSON text
/// matches.
pub fn resolve<'a>(value: &'a JsonValue, path: &JsonPath) -> Result<&'a JsonValue> {
    let mut current = value;
    let mut walked = JsonPath::root();

    for segment in path.segments() {
        walked = walked.child(segment.clone());
        current = match (segment, current) {
            (Segment::Key(key), JsonValue::Object(map)) => map
                .get(key)
                .ok_or_else(|| PathErrorReason::MissingKey(key.clone()).at(&walked))?,
            (Segment::Member(member), JsonValue::Array(items)) => items
                .iter()
                .find(|item| item.to_string() == *member)
                .ok_or_else(|| PathErrorReason::MissingKey(member.clone()).at(&walked))?,
            (Segment::Index(index), JsonValue::Array(items)) => {
                items.get(*index).ok_or_else(|| {
                    PathErrorReason::IndexOutOfRange {
                        index: *index,
                        len: items.len(),
                    }
                    .at(&walked)
                })?
            }
            (Segment::Index(_) | Segment::Member(_), other) => {
                return Err(PathErrorReason::WrongKind {
                    expected: "array",
                    found: value_kind(other).to_string(),
                }
                .at(&walked))
            }
            (_, other) => {
                return Err(PathErrorReason::WrongKind {
                    expected: "object",
                    found: value_kind(other).to_string(),
                }
                .at(&walked))
            }
        };
    }

    Ok(current)
}
