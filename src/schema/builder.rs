//! Schema inference from a single decoded document

use super::types::{IntegerShape, NumberShape, Property, SchemaDocument, StringShape};
use crate::config::SchemaConfig;
use crate::decode::decode_payload;
use crate::error::{Error, Result};
use crate::format::classify;
use crate::path::JsonPath;
use crate::types::{JsonObject, JsonValue};
use serde_json::Number;
use std::collections::BTreeMap;

/// Builds a schema document describing exactly one sample.
///
/// Objects list every observed field as required, arrays take their item
/// schema from the first element, and all bounds are collapsed onto the
/// observed value.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: SchemaConfig,
}

impl SchemaBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with explicit settings
    pub fn with_config(config: SchemaConfig) -> Self {
        Self { config }
    }

    /// Dialect written into built documents
    #[must_use]
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.config.dialect = dialect.into();
        self
    }

    /// Settings in use
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Build the schema of a decoded document
    pub fn build(&self, value: &JsonValue) -> Result<SchemaDocument> {
        let root = self.infer_property(value, &JsonPath::root())?;
        Ok(SchemaDocument::new(self.config.dialect.clone(), root))
    }

    /// Decode a raw payload and build its schema
    pub fn build_from_slice(&self, bytes: &[u8]) -> Result<SchemaDocument> {
        let value = decode_payload(bytes)?;
        self.build(&value)
    }

    /// Infer the schema node of one value
    pub fn infer_property(&self, value: &JsonValue, path: &JsonPath) -> Result<Property> {
        match value {
            JsonValue::Null => Ok(Property::Null),
            JsonValue::Bool(_) => Ok(Property::Boolean),
            JsonValue::Number(n) => self.infer_number(n, path),
            JsonValue::String(s) => Ok(self.infer_string(s)),
            JsonValue::Array(items) => self.infer_array(items, path),
            JsonValue::Object(map) => self.infer_object(map, path),
        }
    }

    fn infer_object(&self, map: &JsonObject, path: &JsonPath) -> Result<Property> {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        let mut properties = BTreeMap::new();
        for key in keys {
            let child = self.infer_property(&map[key], &path.child_key(key.as_str()))?;
            properties.insert(key.clone(), child);
        }
        let required = properties.keys().cloned().collect();

        Ok(Property::object(properties, required))
    }

    fn infer_array(&self, items: &[JsonValue], path: &JsonPath) -> Result<Property> {
        let item_schema = items
            .first()
            .map(|first| self.infer_property(first, &path.child_index(0)))
            .transpose()?;

        Ok(Property::array(item_schema, items.len()))
    }

    fn infer_string(&self, s: &str) -> Property {
        let (format, _) = classify(s);
        let length = s.chars().count();

        let mut examples = Vec::new();
        if length < self.config.example_max_length {
            examples.push(JsonValue::String(s.to_string()));
        }

        Property::String(StringShape {
            format: format
                .and_then(|f| f.as_schema_format())
                .map(str::to_string),
            min_length: length,
            max_length: length,
            examples,
        })
    }

    fn infer_number(&self, n: &Number, path: &JsonPath) -> Result<Property> {
        if n.is_f64() {
            let value = n
                .as_f64()
                .ok_or_else(|| Error::unsupported_type(path.to_string(), n.to_string()))?;
            return Ok(Property::Number(NumberShape {
                minimum: value,
                maximum: value,
                examples: vec![JsonValue::Number(n.clone())],
            }));
        }

        // u64 above i64::MAX has no integer bound representation
        let value = n.as_i64().ok_or_else(|| {
            Error::unsupported_type(path.to_string(), format!("integer {n} exceeds 64-bit range"))
        })?;
        Ok(Property::Integer(IntegerShape {
            minimum: value,
            maximum: value,
            examples: vec![JsonValue::Number(n.clone())],
        }))
    }
}

/// Build a schema document with default settings
pub fn infer_schema(value: &JsonValue) -> Result<SchemaDocument> {
    SchemaBuilder::new().build(value)
}
