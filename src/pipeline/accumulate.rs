//! Bounded fan-out inference with a single merging reducer

use super::types::{Accumulation, AccumulationStatus, SampleFailure};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::schema::{SchemaBuilder, SchemaDocument, SchemaMerger};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Infers many samples concurrently and merges them into one document
#[derive(Debug, Clone)]
pub struct SchemaAccumulator {
    builder: SchemaBuilder,
    merger: SchemaMerger,
    workers: usize,
    deadline: Duration,
}

impl Default for SchemaAccumulator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SchemaAccumulator {
    /// Create an accumulator from engine settings
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            builder: SchemaBuilder::with_config(config.schema.clone()),
            merger: SchemaMerger::from_config(config),
            workers: config.pipeline.workers.max(1),
            deadline: config.pipeline.deadline(),
        }
    }

    /// Set the number of concurrent inference jobs
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the run deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Infer every sample and fold the results into `seed`.
    ///
    /// Without a seed the first sample to arrive starts the document.
    /// Samples are merged in arrival order by this task only. When the
    /// token fires or the deadline passes, outstanding work is abandoned
    /// and the partial result is returned.
    pub async fn accumulate(
        &self,
        seed: Option<SchemaDocument>,
        samples: Vec<Vec<u8>>,
        cancel: &CancellationToken,
    ) -> Accumulation {
        let deadline = Instant::now() + self.deadline;
        let total = samples.len();
        let (tx, mut rx) = mpsc::channel::<(usize, Result<SchemaDocument>)>(self.workers);

        let producer = tokio::spawn(Self::produce(
            self.builder.clone(),
            Arc::new(Semaphore::new(self.workers)),
            samples,
            tx,
        ));

        let mut document = seed;
        let mut merged = 0;
        let mut failures = Vec::new();

        let status = loop {
            if Instant::now() >= deadline {
                break AccumulationStatus::DeadlineExceeded;
            }

            tokio::select! {
                biased;

                () = cancel.cancelled() => break AccumulationStatus::Cancelled,

                () = tokio::time::sleep_until(deadline) => break AccumulationStatus::DeadlineExceeded,

                received = rx.recv() => {
                    let Some((index, inferred)) = received else {
                        break AccumulationStatus::Completed;
                    };

                    let outcome = inferred.and_then(|incoming| match document.as_mut() {
                        Some(accumulated) => self.merger.merge(accumulated, &incoming),
                        None => {
                            document = Some(incoming);
                            Ok(())
                        }
                    });

                    match outcome {
                        Ok(()) => {
                            merged += 1;
                            debug!(index, "Merged sample");
                        }
                        Err(error) => {
                            debug!(index, error = %error, "Rejected sample");
                            failures.push(SampleFailure { index, error });
                        }
                    }
                }
            }
        };

        producer.abort();
        failures.sort_by_key(|failure| failure.index);

        if status == AccumulationStatus::Completed {
            info!(total, merged, failed = failures.len(), "Schema accumulation finished");
        } else {
            warn!(total, merged, failed = failures.len(), %status, "Schema accumulation stopped early");
        }

        Accumulation {
            document,
            merged,
            failures,
            status,
        }
    }

    /// Spawn one blocking inference job per sample. A job keeps its permit
    /// until its result is handed to the channel, so a slow reducer holds
    /// at most `permits` finished results back.
    pub(super) async fn produce(
        builder: SchemaBuilder,
        permits: Arc<Semaphore>,
        samples: Vec<Vec<u8>>,
        tx: mpsc::Sender<(usize, Result<SchemaDocument>)>,
    ) {
        let mut jobs = JoinSet::new();

        for (index, sample) in samples.into_iter().enumerate() {
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };
            let builder = builder.clone();
            let tx = tx.clone();

            jobs.spawn_blocking(move || {
                let inferred = builder.build_from_slice(&sample);
                // receiver gone means the run already stopped
                let _ = tx.blocking_send((index, inferred));
                drop(permit);
            });
        }
        drop(tx);

        while let Some(joined) = jobs.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Inference job failed");
            }
        }
    }
}
