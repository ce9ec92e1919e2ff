//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema inference and structural diffing for recorded API traffic
#[derive(Parser, Debug)]
#[command(name = "replay-contract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer one schema from sample payloads
    Infer {
        /// Sample payload files (JSON)
        #[arg(required = true)]
        samples: Vec<PathBuf>,

        /// Stored schema to widen instead of starting fresh
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Merge stored schema documents, first file first
    Merge {
        /// Schema documents (JSON)
        #[arg(required = true, num_args = 2..)]
        schemas: Vec<PathBuf>,
    },

    /// Diff two documents
    Diff {
        /// Left (baseline) document
        left: PathBuf,

        /// Right document
        right: PathBuf,
    },

    /// Diff baseline against A and A against B, then combine
    Chain {
        /// Baseline document
        baseline: PathBuf,

        /// Intermediate document
        a: PathBuf,

        /// Final document
        b: PathBuf,

        /// Emit every record, not only asserted ones
        #[arg(long)]
        all: bool,
    },

    /// Check documents against a schema document
    Validate {
        /// Schema document (JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Documents to check
        #[arg(required = true)]
        documents: Vec<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chain() {
        let cli = Cli::parse_from([
            "replay-contract",
            "--format",
            "pretty",
            "chain",
            "base.json",
            "a.json",
            "b.json",
            "--all",
        ]);

        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Chain { baseline, all, .. } => {
                assert_eq!(baseline, PathBuf::from("base.json"));
                assert!(all);
            }
            other => panic!("expected chain, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_infer_with_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "replay-contract",
            "infer",
            "one.json",
            "two.json",
            "--seed",
            "seed.json",
            "-v",
            "-C",
            "engine.yaml",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("engine.yaml")));
        match cli.command {
            Commands::Infer { samples, seed } => {
                assert_eq!(samples.len(), 2);
                assert_eq!(seed, Some(PathBuf::from("seed.json")));
            }
            other => panic!("expected infer, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_needs_two_schemas() {
        assert!(Cli::try_parse_from(["replay-contract", "merge", "one.json"]).is_err());
    }
}
