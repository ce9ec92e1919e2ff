//! Schema inference and merging
//!
//! Turns decoded payloads into JSON Schema documents and widens an
//! accumulated document as more samples are observed.
//!
//! # Features
//!
//! - **Inference**: One schema per sample, with string formats and bounds
//! - **Merging**: Bounds widen, `required` shrinks to the common fields
//! - **Null Absorption**: A `null` node adopts the first concrete kind
//! - **Stored Form**: Documents read and write the standard keyword names

mod builder;
mod merge;
mod types;
mod wire;

pub use builder::{infer_schema, SchemaBuilder};
pub use merge::{merge_schemas, SchemaMerger};
pub use types::{
    ArrayShape, IntegerShape, Kind, NumberShape, ObjectShape, Property, SchemaDocument,
    StringShape,
};

#[cfg(test)]
mod tests;
