//! String format classification
//!
//! Detects well-known string subtypes (dates, timestamps, addresses,
//! references, patterns) so inferred schemas can carry a `format` tag.
//!
//! Detection is a fixed-priority battery; the first detector that matches
//! wins. Classification is pure and total: a string that matches nothing is
//! simply a plain string.

mod classifier;

pub use classifier::{classify, StringFormat};
