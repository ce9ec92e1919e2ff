//! Path module
//!
//! Immutable, path-addressed locations inside a JSON document.
//!
//! # Overview
//!
//! - `JsonPath` - ordered sequence of object keys / array indices
//! - `Segment` - one step of a path
//! - `resolve` - walk a decoded document by path
//!
//! A path is never mutated in place: descending into a child produces a new
//! value, so recursive comparisons can be split across threads without
//! sharing a path stack.
//!
//! Canonical form joins keys with `.` and renders indices as `[i]`, e.g.
//! `items[0].id`. The root path renders as the empty string. Set members
//! render as compact JSON, so `ids."1"` and `ids.1` stay distinct.

mod navigate;
mod types;

pub use navigate::{resolve, PathErrorReason};
pub use types::{JsonPath, Segment};

#[cfg(test)]
mod tests;
