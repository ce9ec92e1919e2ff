//! Schema types

use super::wire::WireProperty;
use crate::config::DEFAULT_DIALECT;
use crate::error::{Error, Result};
use crate::path::{JsonPath, PathErrorReason, Segment};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// JSON kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Object => write!(f, "object"),
            Kind::Array => write!(f, "array"),
            Kind::String => write!(f, "string"),
            Kind::Number => write!(f, "number"),
            Kind::Integer => write!(f, "integer"),
            Kind::Boolean => write!(f, "boolean"),
            Kind::Null => write!(f, "null"),
        }
    }
}

/// Shape of an object node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    /// Child schema per field name
    pub properties: BTreeMap<String, Property>,
    /// Fields present in every merged sample
    pub required: BTreeSet<String>,
    /// `additionalProperties`, when a stored schema carried one
    pub additional_properties: Option<bool>,
}

impl ObjectShape {
    /// Get a child schema
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Check if a field is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

/// Shape of an array node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayShape {
    /// Element schema, absent until a non-empty array was observed
    pub items: Option<Box<Property>>,
    pub min_items: usize,
    pub max_items: usize,
}

/// Shape of a string node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringShape {
    /// `format` keyword (date, date-time, email, ...)
    pub format: Option<String>,
    pub min_length: usize,
    pub max_length: usize,
    pub examples: Vec<JsonValue>,
}

/// Shape of a floating-point number node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberShape {
    pub minimum: f64,
    pub maximum: f64,
    pub examples: Vec<JsonValue>,
}

/// Shape of an integer node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegerShape {
    pub minimum: i64,
    pub maximum: i64,
    pub examples: Vec<JsonValue>,
}

impl IntegerShape {
    /// Same bounds as a floating-point shape
    pub fn widen(&self) -> NumberShape {
        NumberShape {
            minimum: self.minimum as f64,
            maximum: self.maximum as f64,
            examples: self.examples.clone(),
        }
    }
}

/// One node of an inferred schema tree.
///
/// Each variant carries only the fields meaningful for its kind, so a
/// string can never have `items` and an array can never have a `format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireProperty", try_from = "WireProperty")]
pub enum Property {
    Object(ObjectShape),
    Array(ArrayShape),
    String(StringShape),
    Number(NumberShape),
    Integer(IntegerShape),
    Boolean,
    /// Placeholder for a value that was `null`; absorbed by the first
    /// concrete kind merged into it
    Null,
}

impl Property {
    /// Kind of this node
    pub fn kind(&self) -> Kind {
        match self {
            Property::Object(_) => Kind::Object,
            Property::Array(_) => Kind::Array,
            Property::String(_) => Kind::String,
            Property::Number(_) => Kind::Number,
            Property::Integer(_) => Kind::Integer,
            Property::Boolean => Kind::Boolean,
            Property::Null => Kind::Null,
        }
    }

    /// Create an object node
    pub fn object(properties: BTreeMap<String, Property>, required: BTreeSet<String>) -> Self {
        Property::Object(ObjectShape {
            properties,
            required,
            additional_properties: None,
        })
    }

    /// Create an array node
    pub fn array(items: Option<Property>, len: usize) -> Self {
        Property::Array(ArrayShape {
            items: items.map(Box::new),
            min_items: len,
            max_items: len,
        })
    }

    /// Object payload, if this is an object
    pub fn as_object(&self) -> Option<&ObjectShape> {
        match self {
            Property::Object(shape) => Some(shape),
            _ => None,
        }
    }

    /// Array payload, if this is an array
    pub fn as_array(&self) -> Option<&ArrayShape> {
        match self {
            Property::Array(shape) => Some(shape),
            _ => None,
        }
    }

    /// String payload, if this is a string
    pub fn as_string(&self) -> Option<&StringShape> {
        match self {
            Property::String(shape) => Some(shape),
            _ => None,
        }
    }

    /// `format` of a string node
    pub fn format(&self) -> Option<&str> {
        self.as_string().and_then(|s| s.format.as_deref())
    }

    /// Follow a path down the schema tree.
    ///
    /// Any array index addresses the array's item schema.
    pub fn lookup(&self, path: &JsonPath) -> Result<&Property> {
        let mut current = self;
        let mut walked = JsonPath::root();

        for segment in path.segments() {
            walked = walked.child(segment.clone());
            current = match (segment, current) {
                (Segment::Key(key), Property::Object(shape)) => shape
                    .properties
                    .get(key)
                    .ok_or_else(|| PathErrorReason::MissingKey(key.clone()).at(&walked))?,
                (Segment::Index(_) | Segment::Member(_), Property::Array(shape)) => shape
                    .items
                    .as_deref()
                    .ok_or_else(|| PathErrorReason::NoItems.at(&walked))?,
                (Segment::Index(_), other) => {
                    return Err(PathErrorReason::WrongKind {
                        expected: "array",
                        found: other.kind().to_string(),
                    }
                    .at(&walked))
                }
                (_, other) => {
                    return Err(PathErrorReason::WrongKind {
                        expected: "object",
                        found: other.kind().to_string(),
                    }
                    .at(&walked))
                }
            };
        }

        Ok(current)
    }
}

/// Full schema document: dialect URI plus the root node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Dialect URI
    #[serde(rename = "$schema", default = "default_dialect")]
    pub dialect: String,

    /// Root node
    #[serde(flatten)]
    pub root: Property,
}

fn default_dialect() -> String {
    DEFAULT_DIALECT.to_string()
}

impl SchemaDocument {
    /// Create a document around a root node
    pub fn new(dialect: impl Into<String>, root: Property) -> Self {
        Self {
            dialect: dialect.into(),
            root,
        }
    }

    /// Read a stored schema document
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::schema(e.to_string()))
    }

    /// Read a stored schema document from text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::schema(e.to_string()))
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Follow a path from the root node
    pub fn lookup(&self, path: &JsonPath) -> Result<&Property> {
        self.root.lookup(path)
    }
}
