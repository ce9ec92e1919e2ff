//! Engine configuration
//!
//! This module contains the configuration structures that tune schema
//! inference, merging and the concurrent pipeline. Configuration can be
//! loaded from YAML or JSON; every field has a default.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default JSON Schema dialect written into inferred documents
pub const DEFAULT_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema inference settings
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Schema merge settings
    #[serde(default)]
    pub merge: MergeConfig,

    /// Worker pool settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl EngineConfig {
    /// Load configuration from a file.
    ///
    /// Files ending in `.json` are read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Self = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an inline YAML (or JSON) string
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.workers == 0 {
            return Err(Error::config("pipeline.workers must be at least 1"));
        }
        if self.pipeline.deadline_ms == 0 {
            return Err(Error::config("pipeline.deadline_ms must be at least 1"));
        }
        if self.schema.max_examples == 0 {
            return Err(Error::config("schema.max_examples must be at least 1"));
        }
        if self.schema.dialect.trim().is_empty() {
            return Err(Error::config("schema.dialect must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Schema Config
// ============================================================================

/// Settings for the schema builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Dialect URI written as `$schema`
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Strings at least this long are not retained as examples
    #[serde(default = "default_example_max_length")]
    pub example_max_length: usize,

    /// Upper bound on accumulated examples per node
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            example_max_length: default_example_max_length(),
            max_examples: default_max_examples(),
        }
    }
}

fn default_dialect() -> String {
    DEFAULT_DIALECT.to_string()
}

fn default_example_max_length() -> usize {
    20
}

fn default_max_examples() -> usize {
    50
}

// ============================================================================
// Merge Config
// ============================================================================

/// Settings for the schema merge engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Widen `integer` + `number` to `number` instead of reporting a conflict
    #[serde(default)]
    pub widen_integer_to_number: bool,
}

// ============================================================================
// Pipeline Config
// ============================================================================

/// Settings for the concurrent accumulation and chained diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of samples inferred concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Deadline for one pipeline run in milliseconds
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            deadline_ms: default_deadline_ms(),
        }
    }
}

impl PipelineConfig {
    /// Deadline as a `Duration`
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

fn default_workers() -> usize {
    4
}

fn default_deadline_ms() -> u64 {
    30_000
}
