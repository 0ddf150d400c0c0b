//! Concrete forms and the payloads they produce on submit.

pub mod login_form;
pub mod objective_form;
pub mod profile_form;
pub mod registration_form;
pub mod skinfold_form;

pub use login_form::{LoginField, LoginForm, LoginPayload};
pub use objective_form::{ObjectiveField, ObjectiveForm, ObjectiveUpdate};
pub use profile_form::{BiometricsUpdate, ProfileField, ProfileForm};
pub use registration_form::{RegistrationField, RegistrationForm, RegistrationPayload};
pub use skinfold_form::{SkinfoldField, SkinfoldForm, SkinfoldSubmission};

use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::form::{FormErrors, FormField};
use crate::domain::validation::RawValue;
use crate::domain::value_objects::ActivityLevel;

// Conversions from already-validated raw text. A failure here means the
// validator and the parser disagree, so it is reported as a field error
// rather than a panic.

fn not_a_number<F: FormField>(field: F, raw: &str) -> FormErrors {
    FormErrors::single(
        field.key(),
        DomainError::NotANumber {
            field: field.key(),
            value: raw.to_string(),
        }
        .to_string(),
    )
}

pub(crate) fn integer<F: FormField>(field: F, raw: &str) -> Result<i64, FormErrors> {
    RawValue::Text(raw)
        .as_i64()
        .ok_or_else(|| not_a_number(field, raw))
}

pub(crate) fn number<F: FormField>(field: F, raw: &str) -> Result<f64, FormErrors> {
    RawValue::Text(raw)
        .as_f64()
        .ok_or_else(|| not_a_number(field, raw))
}

pub(crate) fn activity<F: FormField>(field: F, raw: &str) -> Result<ActivityLevel, FormErrors> {
    number(field, raw).and_then(|v| {
        ActivityLevel::from_multiplier(v).ok_or_else(|| not_a_number(field, raw))
    })
}

pub(crate) fn parsed<F: FormField, T>(field: F, raw: &str) -> Result<T, FormErrors>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>()
        .map_err(|e| FormErrors::single(field.key(), e.to_string()))
}

/// `None` for blank input, otherwise the converted value.
pub(crate) fn optional<T>(
    raw: &str,
    convert: impl FnOnce(&str) -> Result<T, FormErrors>,
) -> Result<Option<T>, FormErrors> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        convert(raw).map(Some)
    }
}
