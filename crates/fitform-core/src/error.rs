//! Unified error handling for fitform core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with categories and user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, ports::ApiError};
use crate::domain::DomainError;

/// Root error type for fitform core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitformError {
    /// Errors from the domain layer (rule violations, typed parsing).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (forms, backend, session).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl From<ApiError> for FitformError {
    fn from(err: ApiError) -> Self {
        Self::Application(err.into())
    }
}

impl FitformError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in fitform".into(),
                "Please report this issue at: https://github.com/cosecruz/fitform/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::Api(api)) if api.is_retryable()
        ) || matches!(self, Self::Application(ApplicationError::SubmissionInProgress))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authentication,
    NotFound,
    Configuration,
    /// Backend unreachable or failing on its side.
    Unavailable,
    Internal,
}

impl From<crate::domain::ErrorCategory> for ErrorCategory {
    fn from(category: crate::domain::ErrorCategory) -> Self {
        match category {
            crate::domain::ErrorCategory::Validation => Self::Validation,
        }
    }
}

/// Convenient result type alias.
pub type FitformResult<T> = Result<T, FitformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_bubble_through_application() {
        let err = FitformError::from(ApiError::Unreachable("refused".into()));
        assert_eq!(err.category(), ErrorCategory::Unavailable);
        assert!(err.is_retryable());
    }

    #[test]
    fn domain_validation_maps_to_validation() {
        let err = FitformError::from(DomainError::UnknownField("nope".into()));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
    }
}
