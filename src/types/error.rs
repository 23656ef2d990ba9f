//! Unified Error Type System
//!
//! Centralized error type for run-level failures.
//!
//! Per-question faults (transport errors, bad status codes, timeouts,
//! unparseable model output) are absorbed by the classifier and never
//! reach the caller as an error. Everything that does surface here aborts
//! the run: unreadable datasets, missing columns, invalid configuration,
//! an unwritable output file.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // -------------------------------------------------------------------------
    // LLM Errors
    // -------------------------------------------------------------------------
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Run Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Dataset error in {path}: {message}")]
    Dataset { path: String, message: String },
}

impl ClassifierError {
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn dataset(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from the text-generation service rather than the local run
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::LlmApi(_) | Self::Timeout { .. } | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

// =============================================================================
// Result Extension
// =============================================================================

/// Attach a dataset path to lower-level errors
pub trait ResultExt<T> {
    fn with_path(self, path: &std::path::Path) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| ClassifierError::dataset(path.display().to_string(), e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = ClassifierError::timeout("chat completion", Duration::from_secs(60));
        assert_eq!(err.to_string(), "Timeout after 60s: chat completion");
        assert!(err.is_transport());
    }

    #[test]
    fn test_dataset_display() {
        let err = ClassifierError::dataset("test.csv", "missing field `uid`");
        assert_eq!(
            err.to_string(),
            "Dataset error in test.csv: missing field `uid`"
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn test_with_path_wraps_source() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = io.with_path(std::path::Path::new("train.csv")).unwrap_err();
        match err {
            ClassifierError::Dataset { path, message } => {
                assert_eq!(path, "train.csv");
                assert!(message.contains("gone"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_from() {
        let err: ClassifierError = std::io::Error::other("disk").into();
        assert!(matches!(err, ClassifierError::Io(_)));
    }
}
