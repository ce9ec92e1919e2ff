// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # replay-contract
//!
//! Sample-driven JSON Schema inference and structural JSON diffing for
//! record-and-replay contract testing.
//!
//! ## Features
//!
//! - **Schema Inference**: One schema per payload, with string formats and bounds
//! - **Accumulate and Widen**: Merge many samples into one contract
//! - **Structural Diff**: Path-addressed differences between two documents
//! - **Chained Diff**: Fold baseline → A and A → B diffs into one report
//! - **Validation**: Check new payloads against an accumulated contract
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use replay_contract::{compare, SchemaBuilder, SchemaMerger, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let builder = SchemaBuilder::new();
//!     let mut contract = builder.build(&json!({"id": 1, "tags": ["a"]}))?;
//!     SchemaMerger::new().merge(&mut contract, &builder.build(&json!({"id": 9}))?)?;
//!     println!("{}", contract.to_json_pretty()?);
//!
//!     let diffs = compare(&json!({"a": [{"x": 1}]}), &json!({"a": [{"x": 2}]}));
//!     assert!(diffs.get("a[0].x").is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   raw bytes ──► decode ──► SchemaBuilder ──► SchemaMerger ──► SchemaDocument
//!                   │          (per sample,      (single          │
//!                   │           worker pool)      reducer)        ▼
//!                   │                                         validate
//!                   └──────► Comparer ──► DiffSet ──► combine ──► asserted report
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for replay-contract
pub mod error;

/// Common types and type aliases
pub mod types;

/// Engine configuration
pub mod config;

/// Raw payload decoding
pub mod decode;

/// Paths into documents and schema trees
pub mod path;

/// String format classification
pub mod format;

/// Schema inference and merging
pub mod schema;

/// Structural JSON diff
pub mod diff;

/// Concurrent accumulation and chained diffing
pub mod pipeline;

/// Validation against inferred schemas
pub mod validate;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::EngineConfig;
pub use diff::{compare, Comparer, DiffRecord, DiffSet};
pub use path::{JsonPath, Segment};
pub use pipeline::{Accumulation, AccumulationStatus, ChainComparator, SchemaAccumulator};
pub use schema::{Property, SchemaBuilder, SchemaDocument, SchemaMerger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
