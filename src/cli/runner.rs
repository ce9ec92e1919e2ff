//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::EngineConfig;
use crate::decode::decode_payload;
use crate::diff::Comparer;
use crate::error::{Error, Result, ResultExt};
use crate::pipeline::{AccumulationStatus, ChainComparator, SchemaAccumulator};
use crate::schema::{SchemaDocument, SchemaMerger};
use crate::types::JsonValue;
use crate::validate::ContractValidator;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Infer { samples, seed } => {
                self.infer(&config, samples, seed.as_deref()).await
            }
            Commands::Merge { schemas } => self.merge(&config, schemas),
            Commands::Diff { left, right } => self.diff(left, right),
            Commands::Chain {
                baseline,
                a,
                b,
                all,
            } => self.chain(&config, baseline, a, b, *all).await,
            Commands::Validate { schema, documents } => self.validate(schema, documents),
            Commands::Config => self.output_message(&serde_json::to_value(&config)?),
        }
    }

    /// Load engine configuration, defaults when no file was given
    fn load_config(&self) -> Result<EngineConfig> {
        match &self.cli.config {
            Some(path) => EngineConfig::from_file(path),
            None => Ok(EngineConfig::default()),
        }
    }

    /// Cancellation token fired by Ctrl-C
    fn interrupt_token() -> CancellationToken {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping");
                on_signal.cancel();
            }
        });
        cancel
    }

    /// Accumulate a schema from sample payloads
    async fn infer(
        &self,
        config: &EngineConfig,
        samples: &[PathBuf],
        seed: Option<&Path>,
    ) -> Result<()> {
        let seed = seed.map(read_schema).transpose()?;
        let payloads = samples
            .iter()
            .map(|path| read_file(path))
            .collect::<Result<Vec<_>>>()?;

        let cancel = Self::interrupt_token();
        let result = SchemaAccumulator::new(config)
            .accumulate(seed, payloads, &cancel)
            .await;
        cancel.cancel();

        for failure in &result.failures {
            warn!(
                sample = %samples[failure.index].display(),
                error = %failure.error,
                "Sample rejected"
            );
        }

        let document = result
            .document
            .ok_or_else(|| Error::Other("no sample could be inferred".to_string()))?;
        self.output_message(&document.to_json()?)?;

        match result.status {
            AccumulationStatus::Completed => Ok(()),
            AccumulationStatus::Cancelled => Err(Error::Cancelled),
            AccumulationStatus::DeadlineExceeded => Err(Error::DeadlineExceeded {
                timeout_ms: config.pipeline.deadline_ms,
            }),
        }
    }

    /// Merge stored schema documents
    fn merge(&self, config: &EngineConfig, schemas: &[PathBuf]) -> Result<()> {
        let mut documents = schemas
            .iter()
            .map(|path| read_schema(path))
            .collect::<Result<Vec<_>>>()?;
        let mut accumulated = documents.remove(0);

        let failures = SchemaMerger::from_config(config).merge_many(&mut accumulated, &documents);
        for (index, error) in &failures {
            warn!(schema = %schemas[index + 1].display(), error = %error, "Schema not merged");
        }

        self.output_message(&accumulated.to_json()?)?;

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{} of {} schema documents could not be merged",
                failures.len(),
                schemas.len() - 1
            )))
        }
    }

    /// Diff two documents
    fn diff(&self, left: &Path, right: &Path) -> Result<()> {
        let diffs = Comparer::new().compare(&read_document(left)?, &read_document(right)?);
        info!(diffs = diffs.len(), "Documents compared");
        self.output_message(&diffs.to_json()?)
    }

    /// Chained diff of three documents
    async fn chain(
        &self,
        config: &EngineConfig,
        baseline: &Path,
        a: &Path,
        b: &Path,
        all: bool,
    ) -> Result<()> {
        let cancel = Self::interrupt_token();
        let report = ChainComparator::new(config)
            .compare_chain(
                read_document(baseline)?,
                read_document(a)?,
                read_document(b)?,
                &cancel,
            )
            .await;
        cancel.cancel();
        let report = report?;

        info!(
            records = report.len(),
            asserted = report.asserted().count(),
            "Chain compared"
        );

        if all {
            self.output_message(&report.to_json()?)
        } else {
            self.output_message(&report.asserted_json()?)
        }
    }

    /// Check documents against a schema
    fn validate(&self, schema: &Path, documents: &[PathBuf]) -> Result<()> {
        let validator = ContractValidator::new(&read_schema(schema)?)?;

        let mut invalid = 0;
        let mut results = serde_json::Map::new();
        for path in documents {
            let violations = validator.violations(&read_document(path)?);
            if !violations.is_empty() {
                invalid += 1;
            }
            results.insert(
                path.display().to_string(),
                json!({
                    "valid": violations.is_empty(),
                    "violations": violations
                }),
            );
        }

        self.output_message(&JsonValue::Object(results))?;

        if invalid == 0 {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{invalid} of {} documents violate the schema",
                documents.len()
            )))
        }
    }

    /// Write one JSON message to stdout
    fn output_message(&self, msg: &JsonValue) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{text}");
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read(path)?)
}

fn read_document(path: &Path) -> Result<JsonValue> {
    decode_payload(&read_file(path)?).with_context(|| path.display().to_string())
}

fn read_schema(path: &Path) -> Result<SchemaDocument> {
    let bytes = read_file(path)?;
    SchemaDocument::from_value(&decode_payload(&bytes)?)
        .with_context(|| path.display().to_string())
}
