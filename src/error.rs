//! Error types for the policy evaluator.
//!
//! Every error here is a configuration error: it can only be raised while a
//! [`PolicyEvaluator`](crate::PolicyEvaluator) is being built. Evaluation
//! itself never fails.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Errors that can occur while building a policy store.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Policy file could not be opened or read.
    #[error("Failed to open policies file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML policy document could not be parsed.
    #[error("Failed to parse policies: {0}")]
    ParseError(String),

    /// JSON policy document could not be decoded.
    #[error("Failed to decode policies: {0}")]
    SerializationError(String),

    /// A policy file was read but its content is not a valid rule document.
    #[error("Failed to decode policies from file '{}': {message}", .path.display())]
    InvalidDocument { path: PathBuf, message: String },
}

impl PolicyError {
    /// Returns true if the error was caused by a missing policy file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PolicyError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for PolicyError {
    fn from(err: serde_yaml::Error) -> Self {
        PolicyError::ParseError(err.to_string())
    }
}
