//! Custom error types for ZenSplit
//!
//! This module defines the error hierarchy for the engine and its front end
//! using thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for ZenSplit operations
#[derive(Error, Debug)]
pub enum ZenSplitError {
    /// Split amounts or percentages do not reconcile with the expense
    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    /// An expense was allocated across nobody
    #[error("An expense needs at least one participant")]
    EmptyParticipants,

    /// Expense amounts must be strictly positive
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    /// Balances handed to the planner do not sum to zero
    #[error("Balances do not sum to zero: off by {total} (tolerance {epsilon})")]
    UnbalancedInput { total: Money, epsilon: Money },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input outside the allocator
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ZenSplitError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors caused by bad caller input; retrying with the same input is pointless
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSplit(_)
                | Self::EmptyParticipants
                | Self::NonPositiveAmount(_)
                | Self::Validation(_)
        )
    }

    /// Errors that point at corrupted stored data rather than bad input
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::UnbalancedInput { .. })
    }
}

impl From<std::io::Error> for ZenSplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZenSplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ZenSplit operations
pub type ZenSplitResult<T> = Result<T, ZenSplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ZenSplitError::InvalidSplit("percentages sum to 90".into());
        assert_eq!(err.to_string(), "Invalid split: percentages sum to 90");
    }

    #[test]
    fn test_not_found_error() {
        let err = ZenSplitError::expense_not_found("exp-1234abcd");
        assert_eq!(err.to_string(), "Expense not found: exp-1234abcd");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unbalanced_display() {
        let err = ZenSplitError::UnbalancedInput {
            total: Money::from_cents(500),
            epsilon: Money::from_cents(1),
        };
        assert_eq!(
            err.to_string(),
            "Balances do not sum to zero: off by 5.00 (tolerance 0.01)"
        );
        assert!(err.is_data_integrity());
        assert!(!err.is_input_validation());
    }

    #[test]
    fn test_taxonomy() {
        assert!(ZenSplitError::EmptyParticipants.is_input_validation());
        assert!(ZenSplitError::NonPositiveAmount(Money::zero()).is_input_validation());
        assert!(!ZenSplitError::Storage("disk".into()).is_input_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ZenSplitError = io_err.into();
        assert!(matches!(err, ZenSplitError::Io(_)));
    }
}
