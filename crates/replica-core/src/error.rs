//! Error types for the Replica toolkit.
//!
//! Every failure the pipeline can raise is a variant of [`ReplicaError`].
//! Variants are grouped into four families, exposed through
//! [`ReplicaError::kind`], so callers can react to the class of failure
//! without matching every variant.

use thiserror::Error;

/// A specialized Result type for Replica operations.
pub type ReplicaResult<T> = Result<T, ReplicaError>;

/// Broad classification of a [`ReplicaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or insufficient input data.
    Data,
    /// A weight vector or selection invariant was violated.
    Validation,
    /// A performance summary lacks something a comparison needs.
    Comparison,
    /// Reading or writing an external file failed.
    Io,
}

/// The main error type for Replica operations.
#[derive(Error, Debug, Clone)]
pub enum ReplicaError {
    /// Malformed or insufficient input.
    #[error("Data error: {reason}")]
    Data {
        /// Description of the data problem.
        reason: String,
    },

    /// A required column is absent from a tabular input.
    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn {
        /// The missing column name.
        column: String,
        /// Where the column was expected.
        source_name: String,
    },

    /// Two series share no dates.
    #[error("Series alignment is empty: no common dates")]
    EmptyAlignment,

    /// Invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid closing price.
    #[error("Invalid price for {symbol} on {date}: {value}")]
    InvalidPrice {
        /// The instrument symbol.
        symbol: String,
        /// The observation date.
        date: String,
        /// The offending price.
        value: f64,
    },

    /// Weight vector invariant violation.
    #[error("Validation error: {reason}")]
    Validation {
        /// Description of the violated invariant.
        reason: String,
    },

    /// The number of selected instruments differs from the target.
    #[error("Support size mismatch: expected {expected}, got {actual}")]
    SupportSize {
        /// Configured target count.
        expected: usize,
        /// Observed number of non-zero weights.
        actual: usize,
    },

    /// A performance summary lacks a horizon needed for comparison.
    #[error("Summary for '{method}' is missing horizon {horizon}")]
    MissingHorizon {
        /// Method whose summary is incomplete.
        method: String,
        /// The missing horizon label.
        horizon: String,
    },

    /// Filesystem or reader failure.
    #[error("IO error: {reason}")]
    Io {
        /// Description of the failure.
        reason: String,
    },

    /// A record could not be parsed.
    #[error("Parse error: {reason}")]
    Parse {
        /// Description of the failure.
        reason: String,
    },

    /// Numerical routine failure.
    #[error("Mathematical error: {reason}")]
    Math {
        /// Description of the error.
        reason: String,
    },
}

impl ReplicaError {
    /// Creates a data error.
    #[must_use]
    pub fn data(reason: impl Into<String>) -> Self {
        Self::Data {
            reason: reason.into(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            source_name: source_name.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a missing horizon error.
    #[must_use]
    pub fn missing_horizon(method: impl Into<String>, horizon: impl Into<String>) -> Self {
        Self::MissingHorizon {
            method: method.into(),
            horizon: horizon.into(),
        }
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io {
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math(reason: impl Into<String>) -> Self {
        Self::Math {
            reason: reason.into(),
        }
    }

    /// Returns the family this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Data { .. }
            | Self::MissingColumn { .. }
            | Self::EmptyAlignment
            | Self::InvalidDate { .. }
            | Self::InvalidPrice { .. }
            | Self::Parse { .. }
            | Self::Math { .. } => ErrorKind::Data,
            Self::Validation { .. } | Self::SupportSize { .. } => ErrorKind::Validation,
            Self::MissingHorizon { .. } => ErrorKind::Comparison,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for ReplicaError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReplicaError::missing_column("close", "prices.csv");
        assert!(err.to_string().contains("close"));
        assert!(err.to_string().contains("prices.csv"));

        let err = ReplicaError::SupportSize {
            expected: 10,
            actual: 7,
        };
        assert!(err.to_string().contains("expected 10, got 7"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ReplicaError::EmptyAlignment.kind(), ErrorKind::Data);
        assert_eq!(ReplicaError::data("x").kind(), ErrorKind::Data);
        assert_eq!(ReplicaError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            ReplicaError::SupportSize {
                expected: 1,
                actual: 2
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ReplicaError::missing_horizon("PCA", "6M").kind(),
            ErrorKind::Comparison
        );
        assert_eq!(ReplicaError::io("disk").kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReplicaError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
