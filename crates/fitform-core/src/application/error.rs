//! Application layer errors.
//!
//! These errors represent failures in orchestration: a form that did not pass,
//! a backend that refused or could not be reached, a missing session.
//! Field rule violations themselves live in `crate::domain`.

use thiserror::Error;

use crate::application::ports::ApiError;
use crate::domain::localization::client;
use crate::domain::{DomainError, FormErrors};
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A form failed its checks; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The operation needs a signed-in user.
    #[error("{}", client::LOGIN_REQUIRED)]
    NotAuthenticated,

    /// Another submit holds the guard.
    #[error("{}", client::SUBMISSION_IN_PROGRESS)]
    SubmissionInProgress,

    /// Session persistence failed.
    #[error("Session storage failed: {reason}")]
    SessionStore { reason: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<FormErrors> for ApplicationError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

impl ApplicationError {
    pub fn session_store(reason: impl ToString) -> Self {
        Self::SessionStore {
            reason: reason.to_string(),
        }
    }

    /// The message a user should see, before localization.
    ///
    /// `None` means no specific message is available and the generic
    /// fallback applies.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Validation(errors) => errors.first().map(str::to_string),
            Self::Api(ApiError::Unreachable(_)) => Some(client::BACKEND_UNREACHABLE.into()),
            Self::Api(api) => api.detail().map(str::to_string),
            Self::NotAuthenticated | Self::SubmissionInProgress => Some(self.to_string()),
            Self::SessionStore { .. } => None,
            Self::Domain(e) => Some(e.to_string()),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => {
                let mut hints: Vec<String> =
                    errors.iter().map(|(f, m)| format!("{f}: {m}")).collect();
                hints.push("Correct the fields above and submit again".into());
                hints
            }
            Self::Api(ApiError::Unreachable(_)) => vec![
                "Check that the backend is running and reachable".into(),
                "Set api.base_url in your config, or use --offline".into(),
            ],
            Self::Api(api) if api.is_unauthorized() => vec![
                "Your session may have expired".into(),
                "Try: fitform login".into(),
            ],
            Self::Api(_) => vec!["Check the error details above".into()],
            Self::NotAuthenticated => vec!["Try: fitform login".into()],
            Self::SubmissionInProgress => vec!["Wait for the current request to finish".into()],
            Self::SessionStore { .. } => vec![
                "Check that the session file is writable".into(),
                "Try: fitform logout to reset the stored session".into(),
            ],
            Self::Domain(e) => e.suggestions(),
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::SubmissionInProgress => ErrorCategory::Validation,
            Self::Api(api) => api.category(),
            Self::NotAuthenticated => ErrorCategory::Authentication,
            Self::SessionStore { .. } => ErrorCategory::Configuration,
            Self::Domain(e) => e.category().into(),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
