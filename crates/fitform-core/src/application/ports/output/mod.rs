//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fitform-adapters` crate provides implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::application::ApplicationResult;
use crate::application::dto::{
    AuthToken, LoggedMeal, MealEntry, MealEstimate, ProgressEvaluation, ProgressTimeline,
    SkinfoldParse, SkinfoldResult, UserProfile,
};
use crate::domain::{
    BiometricsUpdate, LoginPayload, ObjectiveUpdate, ProgressPeriod, RegistrationPayload,
    SkinfoldRequest,
};
use crate::error::ErrorCategory;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure talking to the backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout.
    #[error("Could not reach the server: {0}")]
    Unreachable(String),

    /// Non-2xx response.
    #[error("Server responded with {status}{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    /// 2xx response whose body did not match the contract.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build a status error from a raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            detail: Self::parse_detail(body),
        }
    }

    /// Extract the human-readable message from an error body.
    ///
    /// Accepted shapes:
    /// - `{"detail": "message"}`
    /// - `{"detail": [{"msg": "message", ...}, ...]}` (first entry wins)
    /// - `{"error": "code"}`
    pub fn parse_detail(body: &str) -> Option<String> {
        let json: Value = serde_json::from_str(body).ok()?;
        let from_value = |value: &Value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };
        json.get("detail")
            .and_then(from_value)
            .or_else(|| json.get("error").and_then(from_value))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Worth trying again later without changing the request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unreachable(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::InvalidResponse(_) => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unreachable(_) => ErrorCategory::Unavailable,
            Self::Status { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                404 => ErrorCategory::NotFound,
                400..=499 => ErrorCategory::Validation,
                _ => ErrorCategory::Unavailable,
            },
            Self::InvalidResponse(_) => ErrorCategory::Internal,
        }
    }
}

/// Port for the fitness backend.
///
/// Implemented by:
/// - `fitform_adapters::http::HttpApi` (production)
/// - `fitform_adapters::memory::InMemoryApi` (offline mode, tests)
///
/// Authenticated calls take the bearer token explicitly; the port holds no
/// session state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FitnessApi: Send + Sync {
    async fn login(&self, credentials: &LoginPayload) -> ApiResult<AuthToken>;

    async fn register(&self, payload: &RegistrationPayload) -> ApiResult<UserProfile>;

    async fn current_user(&self, token: &str) -> ApiResult<UserProfile>;

    async fn update_biometrics(
        &self,
        token: &str,
        update: &BiometricsUpdate,
    ) -> ApiResult<UserProfile>;

    async fn update_objective(
        &self,
        token: &str,
        update: &ObjectiveUpdate,
    ) -> ApiResult<UserProfile>;

    async fn calculate_skinfolds(
        &self,
        token: &str,
        request: &SkinfoldRequest,
    ) -> ApiResult<SkinfoldResult>;

    async fn parse_skinfold_text(&self, token: &str, text: &str) -> ApiResult<SkinfoldParse>;

    async fn skinfold_history(&self, token: &str) -> ApiResult<Vec<SkinfoldResult>>;

    /// Food parsing is public on the backend.
    async fn parse_meal(&self, text: &str) -> ApiResult<MealEstimate>;

    async fn log_meal(&self, token: &str, entry: &MealEntry) -> ApiResult<LoggedMeal>;

    async fn evaluate_progress(
        &self,
        token: &str,
        period: ProgressPeriod,
    ) -> ApiResult<ProgressEvaluation>;

    async fn progress_timeline(
        &self,
        token: &str,
        period: ProgressPeriod,
    ) -> ApiResult<ProgressTimeline>;
}

/// A signed-in user, as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
            started_at: Utc::now(),
        }
    }
}

/// Port for session persistence.
///
/// Implemented by:
/// - `fitform_adapters::session::FileSessionStore` (JSON file)
/// - `fitform_adapters::session::MemorySessionStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, if any.
    fn load(&self) -> ApplicationResult<Option<Session>>;

    fn save(&self, session: &Session) -> ApplicationResult<()>;

    /// Remove the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> ApplicationResult<()>;
}
