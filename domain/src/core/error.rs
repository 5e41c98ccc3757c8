//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant is a validation failure raised before a debate session is
/// created, so no state has been mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Topic is required")]
    EmptyTopic,

    #[error("Round count must be a positive integer (got {0})")]
    InvalidRounds(u32),

    #[error("Roster is empty")]
    EmptyRoster,

    #[error("Roster entry #{0} has an empty name")]
    EmptyMemberName(usize),

    #[error("Roster must contain at least one adjudicator")]
    NoAdjudicator,

    #[error("Invalid model selector: {0}")]
    InvalidModel(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Check if this error was caused by caller-supplied configuration
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            DomainError::InvalidModel(_) | DomainError::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_adjudicator_display() {
        let error = DomainError::NoAdjudicator;
        assert_eq!(
            error.to_string(),
            "Roster must contain at least one adjudicator"
        );
    }

    #[test]
    fn test_invalid_rounds_display() {
        assert_eq!(
            DomainError::InvalidRounds(0).to_string(),
            "Round count must be a positive integer (got 0)"
        );
    }

    #[test]
    fn test_is_validation_check() {
        assert!(DomainError::EmptyTopic.is_validation());
        assert!(DomainError::NoAdjudicator.is_validation());
        assert!(!DomainError::InvalidModel("x".to_string()).is_validation());
    }
}
