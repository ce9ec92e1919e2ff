//! CLI module
//!
//! Command-line interface over the inference, merge and diff engines.
//!
//! # Commands
//!
//! - `infer` - Accumulate one schema from many sample payloads
//! - `merge` - Widen stored schema documents into one
//! - `diff` - Structural diff of two documents
//! - `chain` - Baseline → A → B diff with end-to-end assertion
//! - `validate` - Check documents against a schema
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
