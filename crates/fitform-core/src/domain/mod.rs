//! Core domain layer for fitform.
//!
//! Pure, synchronous logic: constraints, value objects, field validators,
//! form state, skinfold math, localization and series summaries.
//!
//! ## Rules
//!
//! - **No async, no I/O**: network and storage go through application ports
//! - **No logging**: observability belongs to the application and CLI layers
//! - **Total validators**: checks return `ValidationResult`, never panic

pub mod constraints;
pub mod entities;
pub mod error;
pub mod form;
pub mod localization;
pub mod skinfold;
pub mod timeline;
pub mod validation;
pub mod value_objects;

pub use constraints::Constraints;
pub use entities::{
    BiometricsUpdate, LoginField, LoginForm, LoginPayload, ObjectiveField, ObjectiveForm,
    ObjectiveUpdate, ProfileField, ProfileForm, RegistrationField, RegistrationForm,
    RegistrationPayload, SkinfoldField, SkinfoldForm, SkinfoldSubmission,
};
pub use error::{DomainError, ErrorCategory};
pub use form::{FieldStatus, Form, FormErrors, FormField, FormState, Trigger};
pub use localization::{Locale, Localizer};
pub use skinfold::{
    BodyFatEstimate, Readiness, SkinfoldRequest, SkinfoldSheet, SkinfoldValues,
    average_readings, estimate_body_fat,
};
pub use timeline::{SeriesSummary, Trend, sparkline};
pub use validation::{
    FieldValidator, RawValue, RegistrationInput, RegistrationReport, ValidationResult,
    truncate_password_if_needed, validate_activity_level, validate_age,
    validate_aggressiveness_level, validate_email, validate_gender, validate_height,
    validate_name, validate_objective, validate_password, validate_user_registration,
    validate_weight,
};
pub use value_objects::{
    ActivityLevel, AggressivenessLevel, FitnessObjective, Gender, ProgressPeriod, SkinfoldSite,
};
