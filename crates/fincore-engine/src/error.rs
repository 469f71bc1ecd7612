//! Error types for the cash-flow engine.

use rust_decimal::Decimal;
use thiserror::Error;

use fincore_core::Date;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while building or walking a schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The amortization schedule violates a structural rule.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the violation.
        reason: String,
    },

    /// A monetary or rate input is out of range.
    #[error("Invalid amount: {value} - {reason}")]
    InvalidAmount {
        /// The offending value.
        value: Decimal,
        /// Reason for invalidity.
        reason: String,
    },

    /// The index backend cannot supply a rate for a required date.
    #[error("Missing index data for {date}")]
    MissingIndexData {
        /// The date the backend could not answer.
        date: Date,
    },

    /// An extraordinary prepayment exceeds the outstanding balance.
    #[error("Prepayment exceeds outstanding balance by {excess}")]
    PrepaymentExceedsBalance {
        /// Amount by which the prepayment exceeds the balance.
        excess: Decimal,
    },

    /// The terminal balance failed to close to zero.
    #[error("Reconciliation failed: terminal residual {residual}")]
    Reconciliation {
        /// The residual left on the balance after the terminal entry.
        residual: Decimal,
    },

    /// The API surface was used inconsistently.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the misuse.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] fincore_core::CoreError),
}

impl EngineError {
    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(value: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value,
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = EngineError::invalid_schedule("ratios sum to 0.9");
        assert!(err.to_string().contains("Invalid schedule"));

        let err = EngineError::PrepaymentExceedsBalance { excess: dec!(500) };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_core_error_conversion() {
        let core = fincore_core::CoreError::invalid_date("bad");
        let err: EngineError = core.into();
        assert!(matches!(err, EngineError::Core(_)));
    }
}
