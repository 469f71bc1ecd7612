//! Error types for the Fincore core library.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core date and rate calculations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Mathematical error (non-positive compounding base, overflow).
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::math_error("compounding base must be positive");
        assert!(err.to_string().contains("Math error"));
    }
}
