//! Concurrent schema accumulation and chained diffing
//!
//! Samples are inferred on a bounded pool of blocking workers and folded
//! into one document by a single reducer. The two comparisons of a
//! baseline → A → B chain run side by side and meet once, when their
//! results are combined. Both honour a deadline and a cancellation token.

mod accumulate;
mod chain;
mod types;

pub use accumulate::SchemaAccumulator;
pub use chain::ChainComparator;
pub use types::{Accumulation, AccumulationStatus, SampleFailure};
