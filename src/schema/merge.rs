//! Accumulate-and-widen merging of schema documents

use super::types::{
    ArrayShape, IntegerShape, NumberShape, ObjectShape, Property, SchemaDocument, StringShape,
};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::path::JsonPath;
use crate::types::JsonValue;
use tracing::{debug, warn};

/// Widens an accumulated schema with newly observed ones.
///
/// Bounds only grow and `required` only shrinks. A merge either applies in
/// full or leaves the accumulated document untouched.
#[derive(Debug, Clone)]
pub struct SchemaMerger {
    widen_integer_to_number: bool,
    max_examples: usize,
}

impl Default for SchemaMerger {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl SchemaMerger {
    /// Create a merger with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger from engine settings
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            widen_integer_to_number: config.merge.widen_integer_to_number,
            max_examples: config.schema.max_examples,
        }
    }

    /// Treat integer + number as number instead of a conflict
    #[must_use]
    pub fn with_integer_widening(mut self, enabled: bool) -> Self {
        self.widen_integer_to_number = enabled;
        self
    }

    /// Cap on accumulated examples per node
    #[must_use]
    pub fn with_max_examples(mut self, max: usize) -> Self {
        self.max_examples = max;
        self
    }

    /// Merge `incoming` into `accumulated`.
    ///
    /// On a type conflict the error names the full path of the node and
    /// `accumulated` is left as it was.
    pub fn merge(&self, accumulated: &mut SchemaDocument, incoming: &SchemaDocument) -> Result<()> {
        if accumulated.root == incoming.root {
            return Ok(());
        }

        let mut working = accumulated.root.clone();
        self.merge_property(&mut working, &incoming.root, &JsonPath::root())?;
        accumulated.root = working;
        Ok(())
    }

    /// Merge several documents in order.
    ///
    /// Returns the index and error of every document that was rejected; the
    /// others are all applied.
    pub fn merge_many<'a, I>(&self, accumulated: &mut SchemaDocument, incoming: I) -> Vec<(usize, Error)>
    where
        I: IntoIterator<Item = &'a SchemaDocument>,
    {
        let mut failures = Vec::new();
        for (index, document) in incoming.into_iter().enumerate() {
            if let Err(e) = self.merge(accumulated, document) {
                debug!(index, error = %e, "Rejected schema document");
                failures.push((index, e));
            }
        }
        failures
    }

    fn merge_property(&self, acc: &mut Property, inc: &Property, path: &JsonPath) -> Result<()> {
        if acc == inc {
            return Ok(());
        }

        match (&*acc, inc) {
            (Property::Null, _) => {
                *acc = inc.clone();
                return Ok(());
            }
            (_, Property::Null) => return Ok(()),
            (Property::Integer(a), Property::Number(_)) if self.widen_integer_to_number => {
                *acc = Property::Number(a.widen());
            }
            _ => {}
        }

        let widened;
        let inc = match (&*acc, inc) {
            (Property::Number(_), Property::Integer(b)) if self.widen_integer_to_number => {
                widened = Property::Number(b.widen());
                &widened
            }
            _ => inc,
        };

        match (acc, inc) {
            (Property::Object(a), Property::Object(b)) => self.merge_object(a, b, path),
            (Property::Array(a), Property::Array(b)) => self.merge_array(a, b, path),
            (Property::String(a), Property::String(b)) => {
                self.merge_string(a, b, path);
                Ok(())
            }
            (Property::Number(a), Property::Number(b)) => {
                self.merge_number(a, b);
                Ok(())
            }
            (Property::Integer(a), Property::Integer(b)) => {
                self.merge_integer(a, b);
                Ok(())
            }
            (Property::Boolean, Property::Boolean) => Ok(()),
            (a, b) => Err(Error::type_conflict(
                path.to_string(),
                a.kind().to_string(),
                b.kind().to_string(),
            )),
        }
    }

    fn merge_object(&self, a: &mut ObjectShape, b: &ObjectShape, path: &JsonPath) -> Result<()> {
        for (name, incoming) in &b.properties {
            match a.properties.get_mut(name) {
                Some(existing) => {
                    self.merge_property(existing, incoming, &path.child_key(name.as_str()))?;
                }
                None => {
                    a.properties.insert(name.clone(), incoming.clone());
                }
            }
        }

        a.required = a.required.intersection(&b.required).cloned().collect();
        a.additional_properties = a.additional_properties.or(b.additional_properties);
        Ok(())
    }

    fn merge_array(&self, a: &mut ArrayShape, b: &ArrayShape, path: &JsonPath) -> Result<()> {
        if let Some(incoming) = b.items.as_deref() {
            match a.items.as_deref_mut() {
                // item schemas are addressed as index 0
                Some(existing) => self.merge_property(existing, incoming, &path.child_index(0))?,
                None => a.items = Some(Box::new(incoming.clone())),
            }
        }

        a.min_items = a.min_items.min(b.min_items);
        a.max_items = a.max_items.max(b.max_items);
        Ok(())
    }

    fn merge_string(&self, a: &mut StringShape, b: &StringShape, path: &JsonPath) {
        if let Some(incoming) = &b.format {
            match &a.format {
                None => a.format = Some(incoming.clone()),
                Some(kept) if kept != incoming => {
                    warn!(path = %path, kept = %kept, ignored = %incoming, "String format conflict, keeping accumulated format");
                }
                Some(_) => {}
            }
        }

        a.min_length = a.min_length.min(b.min_length);
        a.max_length = a.max_length.max(b.max_length);
        self.extend_examples(&mut a.examples, &b.examples);
    }

    fn merge_number(&self, a: &mut NumberShape, b: &NumberShape) {
        a.minimum = a.minimum.min(b.minimum);
        a.maximum = a.maximum.max(b.maximum);
        self.extend_examples(&mut a.examples, &b.examples);
    }

    fn merge_integer(&self, a: &mut IntegerShape, b: &IntegerShape) {
        a.minimum = a.minimum.min(b.minimum);
        a.maximum = a.maximum.max(b.maximum);
        self.extend_examples(&mut a.examples, &b.examples);
    }

    fn extend_examples(&self, examples: &mut Vec<JsonValue>, incoming: &[JsonValue]) {
        examples.extend_from_slice(incoming);
        examples.truncate(self.max_examples);
    }
}

/// Merge two documents with default settings, returning the widened result
pub fn merge_schemas(left: &SchemaDocument, right: &SchemaDocument) -> Result<SchemaDocument> {
    let mut merged = left.clone();
    SchemaMerger::new().merge(&mut merged, right)?;
    Ok(merged)
}
