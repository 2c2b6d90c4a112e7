//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No quotes available")]
    EmptyPool,

    #[error("Game already in progress")]
    AlreadyStarted,

    #[error("Invalid origin label: {0}")]
    InvalidOrigin(String),

    #[error("Invalid quote: {0}")]
    InvalidQuote(String),
}

impl DomainError {
    /// Check if this error means the player can simply try starting again
    pub fn is_retryable_start(&self) -> bool {
        matches!(self, DomainError::EmptyPool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_display() {
        let error = DomainError::EmptyPool;
        assert_eq!(error.to_string(), "No quotes available");
    }

    #[test]
    fn test_retryable_start_check() {
        assert!(DomainError::EmptyPool.is_retryable_start());
        assert!(!DomainError::AlreadyStarted.is_retryable_start());
        assert!(!DomainError::InvalidOrigin("bot".to_string()).is_retryable_start());
    }
}
