//! Stored JSON Schema form of a property node

use super::types::{
    ArrayShape, IntegerShape, Kind, NumberShape, ObjectShape, Property, StringShape,
};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

/// Flat keyword layout of one schema node, as written to disk.
///
/// Absent bounds read back as zero, which is how omitted zero-valued
/// keywords are stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<Kind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<String, WireProperty>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    additional_properties: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<WireProperty>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    min_items: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_items: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    examples: Option<Vec<JsonValue>>,
}

impl WireProperty {
    fn of_kind(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    fn examples(examples: Vec<JsonValue>) -> Option<Vec<JsonValue>> {
        (!examples.is_empty()).then_some(examples)
    }
}

impl From<Property> for WireProperty {
    fn from(property: Property) -> Self {
        let mut wire = Self::of_kind(property.kind());
        match property {
            Property::Object(shape) => {
                wire.properties = Some(
                    shape
                        .properties
                        .into_iter()
                        .map(|(name, child)| (name, child.into()))
                        .collect(),
                );
                if !shape.required.is_empty() {
                    wire.required = Some(shape.required.into_iter().collect());
                }
                wire.additional_properties = shape.additional_properties;
            }
            Property::Array(shape) => {
                wire.items = shape.items.map(|items| Box::new((*items).into()));
                wire.min_items = Some(shape.min_items);
                wire.max_items = Some(shape.max_items);
            }
            Property::String(shape) => {
                wire.format = shape.format;
                wire.min_length = Some(shape.min_length);
                wire.max_length = Some(shape.max_length);
                wire.examples = Self::examples(shape.examples);
            }
            Property::Number(shape) => {
                wire.minimum = Number::from_f64(shape.minimum);
                wire.maximum = Number::from_f64(shape.maximum);
                wire.examples = Self::examples(shape.examples);
            }
            Property::Integer(shape) => {
                wire.minimum = Some(shape.minimum.into());
                wire.maximum = Some(shape.maximum.into());
                wire.examples = Self::examples(shape.examples);
            }
            Property::Boolean | Property::Null => {}
        }
        wire
    }
}

impl TryFrom<WireProperty> for Property {
    type Error = Error;

    fn try_from(wire: WireProperty) -> Result<Self> {
        let kind = wire
            .kind
            .ok_or_else(|| Error::schema("schema node has no 'type'"))?;

        let property = match kind {
            Kind::Object => {
                let properties = wire
                    .properties
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(name, child)| Ok((name, Property::try_from(child)?)))
                    .collect::<Result<_>>()?;
                Property::Object(ObjectShape {
                    properties,
                    required: wire.required.unwrap_or_default().into_iter().collect(),
                    additional_properties: wire.additional_properties,
                })
            }
            Kind::Array => Property::Array(ArrayShape {
                items: wire
                    .items
                    .map(|items| Property::try_from(*items).map(Box::new))
                    .transpose()?,
                min_items: wire.min_items.unwrap_or_default(),
                max_items: wire.max_items.unwrap_or_default(),
            }),
            Kind::String => Property::String(StringShape {
                format: wire.format,
                min_length: wire.min_length.unwrap_or_default(),
                max_length: wire.max_length.unwrap_or_default(),
                examples: wire.examples.unwrap_or_default(),
            }),
            Kind::Number => Property::Number(NumberShape {
                minimum: wire.minimum.as_ref().and_then(Number::as_f64).unwrap_or_default(),
                maximum: wire.maximum.as_ref().and_then(Number::as_f64).unwrap_or_default(),
                examples: wire.examples.unwrap_or_default(),
            }),
            Kind::Integer => Property::Integer(IntegerShape {
                minimum: integer_bound(wire.minimum.as_ref(), "minimum")?,
                maximum: integer_bound(wire.maximum.as_ref(), "maximum")?,
                examples: wire.examples.unwrap_or_default(),
            }),
            Kind::Boolean => Property::Boolean,
            Kind::Null => Property::Null,
        };

        Ok(property)
    }
}

fn integer_bound(bound: Option<&Number>, keyword: &str) -> Result<i64> {
    match bound {
        None => Ok(0),
        Some(n) => n
            .as_i64()
            .ok_or_else(|| Error::schema(format!("integer node has non-integer {keyword} {n}"))),
    }
}
