//! Baseline → A → B diff chain

use crate::config::EngineConfig;
use crate::diff::{Comparer, DiffSet};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs the baseline-vs-A and A-vs-B comparisons and combines them
#[derive(Debug, Clone)]
pub struct ChainComparator {
    comparer: Comparer,
    deadline: Duration,
}

impl Default for ChainComparator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ChainComparator {
    /// Create a chain comparator from engine settings
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            comparer: Comparer::new(),
            deadline: config.pipeline.deadline(),
        }
    }

    /// Set the deadline for both comparisons together
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Compare `baseline` with `a` and `a` with `b` concurrently, then fold
    /// the second report into the first.
    ///
    /// Cancellation or the deadline stops both comparisons at their next
    /// recursion step.
    pub async fn compare_chain(
        &self,
        baseline: JsonValue,
        a: JsonValue,
        b: JsonValue,
        cancel: &CancellationToken,
    ) -> Result<DiffSet> {
        if self.deadline.is_zero() {
            return Err(self.deadline_exceeded());
        }

        let comparer = self.comparer;
        let a = Arc::new(a);
        // stops both comparisons on every exit path
        let stop = cancel.child_token();
        let _stop_guard = stop.clone().drop_guard();

        let upstream = {
            let a = Arc::clone(&a);
            let stop = stop.clone();
            spawn_blocking(move || comparer.compare_until(&baseline, &a, &stop))
        };
        let downstream = spawn_blocking(move || comparer.compare_until(&a, &b, &stop));

        let (upstream, downstream) = tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(Error::Cancelled),

            () = tokio::time::sleep(self.deadline) => return Err(self.deadline_exceeded()),

            joined = async { tokio::try_join!(upstream, downstream) } => {
                joined.map_err(|e| Error::worker(e.to_string()))?
            }
        };
        let (mut report, downstream) = (upstream?, downstream?);

        debug!(
            upstream = report.len(),
            downstream = downstream.len(),
            "Combining chained diffs"
        );
        report.combine(downstream);
        Ok(report)
    }

    fn deadline_exceeded(&self) -> Error {
        Error::DeadlineExceeded {
            timeout_ms: self.deadline.as_millis() as u64,
        }
    }
}
