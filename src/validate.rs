//! Checking documents against an inferred schema
//!
//! The emitted schema is compiled with the `jsonschema` crate, so a
//! document accepted here satisfies every bound the accumulated contract
//! records.

use crate::error::{Error, Result};
use crate::schema::SchemaDocument;
use crate::types::JsonValue;
use jsonschema::Validator;

/// Compiled schema ready to check many documents
pub struct ContractValidator {
    validator: Validator,
}

impl ContractValidator {
    /// Compile a schema document
    pub fn new(schema: &SchemaDocument) -> Result<Self> {
        let schema = schema.to_json()?;
        let validator = Validator::new(&schema).map_err(|e| Error::Validation {
            message: e.to_string(),
        })?;
        Ok(Self { validator })
    }

    /// Violation messages for `instance`, empty when it conforms
    pub fn violations(&self, instance: &JsonValue) -> Vec<String> {
        self.validator
            .iter_errors(instance)
            .map(|error| {
                let path = error.instance_path().to_string();
                let path = if path.is_empty() || path == "/" {
                    "root".to_string()
                } else {
                    path
                };
                format!("{path}: {error}")
            })
            .collect()
    }

    pub fn is_valid(&self, instance: &JsonValue) -> bool {
        self.validator.is_valid(instance)
    }
}

/// Check one document against a schema document
pub fn validate_instance(schema: &SchemaDocument, instance: &JsonValue) -> Result<Vec<String>> {
    Ok(ContractValidator::new(schema)?.violations(instance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{infer_schema, SchemaMerger};
    use serde_json::json;

    #[test]
    fn test_sample_satisfies_own_schema() {
        let sample = json!({"id": 3, "name": "Ann", "tags": ["a", "b"], "score": 0.5});
        let schema = infer_schema(&sample).unwrap();

        assert!(validate_instance(&schema, &sample).unwrap().is_empty());
    }

    #[test]
    fn test_violations_reported_with_path() {
        let schema = infer_schema(&json!({"id": 3, "name": "Ann"})).unwrap();

        let violations = validate_instance(&schema, &json!({"id": "3"})).unwrap();

        assert!(violations.len() >= 2);
        assert!(violations.iter().any(|v| v.starts_with("/id: ")));
        assert!(violations.iter().any(|v| v.starts_with("root: ") && v.contains("name")));
    }

    #[test]
    fn test_widened_bounds_accept_every_sample() {
        let samples = [json!({"n": 1, "s": "ab"}), json!({"n": 9, "s": "abcdef"})];
        let mut schema = infer_schema(&samples[0]).unwrap();
        SchemaMerger::new().merge(&mut schema, &infer_schema(&samples[1]).unwrap()).unwrap();

        let validator = ContractValidator::new(&schema).unwrap();
        for sample in &samples {
            assert!(validator.is_valid(sample));
        }
        assert!(!validator.is_valid(&json!({"n": 10, "s": "abc"})));
        assert!(!validator.is_valid(&json!({"n": 5, "s": "a"})));
    }
}
