//! CLI error types.

use std::path::PathBuf;

use replica_core::ReplicaError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// An input file does not exist.
    #[error("Input file not found: {path}. {hint}")]
    MissingInput {
        /// Expected location.
        path: PathBuf,
        /// Command that produces it.
        hint: String,
    },

    /// No summary stored for a method.
    #[error("No stored summary for method {0}. Run its command first.")]
    MissingSummary(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline error.
    #[error(transparent)]
    Replica(#[from] ReplicaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
