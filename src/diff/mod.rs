//! Structural JSON diffing
//!
//! Compares two decoded documents and reports every location where they
//! diverge, keyed by canonical path. Two diff sets computed along a
//! baseline → A → B chain can be folded into one end-to-end report.
//!
//! Arrays of objects or arrays are compared by position. Arrays of scalars
//! are compared as unordered sets, with each missing element reported under
//! its compact JSON text.

mod aggregate;
mod engine;
mod types;

pub use engine::{compare, Comparer};
pub use types::{DiffRecord, DiffSet};
