//! Error types for numerical routines.

use replica_core::ReplicaError;
use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone)]
pub enum MathError {
    /// Matrix or series dimensions are incompatible.
    #[error("Incompatible dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first operand.
        rows1: usize,
        /// Columns in first operand.
        cols1: usize,
        /// Rows in second operand.
        rows2: usize,
        /// Columns in second operand.
        cols2: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Input contains NaN or infinite values.
    #[error("Non-finite value in {operation}")]
    NonFinite {
        /// The operation that received the value.
        operation: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a length mismatch error for two series.
    #[must_use]
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::DimensionMismatch {
            rows1: left,
            cols1: 1,
            rows2: right,
            cols2: 1,
        }
    }

    /// Creates a non-finite value error.
    #[must_use]
    pub fn non_finite(operation: impl Into<String>) -> Self {
        Self::NonFinite {
            operation: operation.into(),
        }
    }
}

impl From<MathError> for ReplicaError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { .. } => ReplicaError::data(err.to_string()),
            _ => ReplicaError::math(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_core::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = MathError::insufficient_data(2, 1);
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_conversion_keeps_data_family() {
        let err: ReplicaError = MathError::length_mismatch(3, 4).into();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().contains("(3x1)"));
    }
}
