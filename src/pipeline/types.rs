//! Pipeline result types

use crate::error::Error;
use crate::schema::SchemaDocument;

/// How an accumulation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulationStatus {
    /// Every sample was processed
    Completed,
    /// The cancellation token fired first
    Cancelled,
    /// The deadline passed first
    DeadlineExceeded,
}

impl std::fmt::Display for AccumulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccumulationStatus::Completed => write!(f, "completed"),
            AccumulationStatus::Cancelled => write!(f, "cancelled"),
            AccumulationStatus::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// A sample that could not be folded in
#[derive(Debug)]
pub struct SampleFailure {
    /// Position of the sample in the input
    pub index: usize,
    pub error: Error,
}

/// Outcome of an accumulation run.
///
/// A run that stopped early still carries everything merged up to then.
#[derive(Debug)]
pub struct Accumulation {
    /// Accumulated document, `None` if there was no seed and no sample
    /// could be inferred
    pub document: Option<SchemaDocument>,
    /// Number of samples merged
    pub merged: usize,
    /// Rejected samples, by index
    pub failures: Vec<SampleFailure>,
    pub status: AccumulationStatus,
}

impl Accumulation {
    /// Whether every sample was seen
    pub fn is_complete(&self) -> bool {
        self.status == AccumulationStatus::Completed
    }
}
