//! Error types for replay-contract
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Builder errors (`Parse`, `UnsupportedType`) are fatal to the one sample
//! being processed. Merge errors (`TypeConflict`) carry the full path of the
//! conflicting node. The diff engine never fails.

use thiserror::Error;

/// The main error type for replay-contract
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Failed to parse payload: {message}")]
    Parse { message: String },

    #[error("Unsupported value type '{found}' at '{path}'")]
    UnsupportedType { path: String, found: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Type conflict at '{path}': {left} vs {right}")]
    TypeConflict {
        path: String,
        left: String,
        right: String,
    },

    #[error("Invalid schema document: {message}")]
    Schema { message: String },

    #[error("Schema validation setup failed: {message}")]
    Validation { message: String },

    // ============================================================================
    // Navigation Errors
    // ============================================================================
    #[error("Path error at '{path}': {reason}")]
    Path { path: String, reason: String },

    // ============================================================================
    // Pipeline Errors
    // ============================================================================
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Deadline exceeded after {timeout_ms}ms")]
    DeadlineExceeded { timeout_ms: u64 },

    #[error("Worker task failed: {message}")]
    Worker { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnsupportedType {
            path: path.into(),
            found: found.into(),
        }
    }

    /// Create a type conflict error
    pub fn type_conflict(
        path: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self::TypeConflict {
            path: path.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a path error
    pub fn path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a worker error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }
}

/// Result type alias for replay-contract
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::type_conflict("a.b", "string", "integer");
        assert_eq!(err.to_string(), "Type conflict at 'a.b': string vs integer");

        let err = Error::path("a[3]", "index out of range");
        assert_eq!(err.to_string(), "Path error at 'a[3]': index out of range");

        let err = Error::DeadlineExceeded { timeout_ms: 250 };
        assert_eq!(err.to_string(), "Deadline exceeded after 250ms");
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::parse("inner"));
        let with_context = result.context("sample 3");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("sample 3: Failed to parse payload: inner"));
    }
}
