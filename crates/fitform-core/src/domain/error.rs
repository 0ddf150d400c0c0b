// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Validators never return this: they report through `ValidationResult`.
/// These errors come from typed parsing (`FromStr`, serde conversions) and
/// from form submission.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parsing Errors
    // ========================================================================
    #[error("'{value}' is not a valid {field}")]
    UnknownValue { field: &'static str, value: String },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    // ========================================================================
    // Form Errors
    // ========================================================================
    #[error("Form has {count} invalid field(s): {summary}")]
    InvalidForm { count: usize, summary: String },

    #[error("Missing {missing} of {total} skinfold sites")]
    IncompleteSkinfolds { missing: usize, total: usize },

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    // ========================================================================
    // Body Composition Errors
    // ========================================================================
    #[error("{site}: {value} mm is outside the accepted range")]
    SkinfoldOutOfRange { site: &'static str, value: f64 },

    #[error("{0}")]
    BodyFatUnavailable(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownValue { field, .. } => vec![
                format!("Check the value given for '{}'", field),
                "Run: fitform constraints to see accepted values".into(),
            ],
            Self::NotANumber { field, .. } => {
                vec![format!("'{}' expects a numeric value", field)]
            }
            Self::InvalidForm { summary, .. } => vec![
                "Correct the fields below and submit again".into(),
                summary.clone(),
            ],
            Self::IncompleteSkinfolds { missing, .. } => vec![format!(
                "Add readings for the {} remaining site(s) with --site name=value",
                missing
            )],
            Self::UnknownField(_) => vec!["See --help for the list of fields".into()],
            Self::SkinfoldOutOfRange { .. } => vec![
                "Caliper readings must be between 1 and 100 mm".into(),
                "Re-measure the site and enter the new value".into(),
            ],
            Self::BodyFatUnavailable(_) => {
                vec!["Measure all seven sites, or at least chest, abdomen and thigh".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownValue { .. }
            | Self::NotANumber { .. }
            | Self::InvalidForm { .. }
            | Self::IncompleteSkinfolds { .. }
            | Self::UnknownField(_)
            | Self::SkinfoldOutOfRange { .. }
            | Self::BodyFatUnavailable(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
}
