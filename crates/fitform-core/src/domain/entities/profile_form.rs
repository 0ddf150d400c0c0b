use serde::{Deserialize, Serialize};

use super::{activity, integer, number, optional, parsed};
use crate::domain::constraints::Constraints;
use crate::domain::form::{Form, FormErrors, FormField, FormState};
use crate::domain::localization::client;
use crate::domain::validation::{FieldValidator, ValidationResult, fields};
use crate::domain::value_objects::{ActivityLevel, Gender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Age,
    Gender,
    Weight,
    Height,
    ActivityLevel,
}

impl FormField for ProfileField {
    const ALL: &'static [Self] = &[
        Self::FirstName,
        Self::LastName,
        Self::Age,
        Self::Gender,
        Self::Weight,
        Self::Height,
        Self::ActivityLevel,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::FirstName => fields::FIRST_NAME,
            Self::LastName => fields::LAST_NAME,
            Self::Age => fields::AGE,
            Self::Gender => fields::GENDER,
            Self::Weight => fields::WEIGHT,
            Self::Height => fields::HEIGHT,
            Self::ActivityLevel => fields::ACTIVITY_LEVEL,
        }
    }
}

/// Partial profile update. Absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

impl BiometricsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the update touches the name fields, which live outside the
    /// biometrics resource.
    pub fn changes_names(&self) -> bool {
        self.first_name.is_some() || self.last_name.is_some()
    }
}

/// Profile edit form. A blank field means "keep the current value".
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    state: FormState<ProfileField>,
    validator: FieldValidator,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraints(constraints: Constraints) -> Self {
        Self {
            state: FormState::new(),
            validator: FieldValidator::new(constraints),
        }
    }

    pub fn submit(&mut self) -> Result<BiometricsUpdate, FormErrors> {
        self.validate_all()?;
        self.to_update()
    }

    fn to_update(&self) -> Result<BiometricsUpdate, FormErrors> {
        use ProfileField as F;
        let text = |f: F| {
            let v = self.value(f).trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        Ok(BiometricsUpdate {
            first_name: text(F::FirstName),
            last_name: text(F::LastName),
            age: optional(self.value(F::Age), |raw| integer(F::Age, raw))?,
            gender: optional(self.value(F::Gender), |raw| parsed(F::Gender, raw))?,
            weight: optional(self.value(F::Weight), |raw| number(F::Weight, raw))?,
            height: optional(self.value(F::Height), |raw| number(F::Height, raw))?,
            activity_level: optional(self.value(F::ActivityLevel), |raw| {
                activity(F::ActivityLevel, raw)
            })?,
        })
    }
}

impl Form for ProfileForm {
    type Field = ProfileField;

    fn state(&self) -> &FormState<ProfileField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<ProfileField> {
        &mut self.state
    }

    fn check(&self, field: ProfileField) -> ValidationResult {
        use ProfileField as F;
        let value = self.value(field);
        if value.trim().is_empty() {
            return ValidationResult::ok();
        }
        let v = &self.validator;
        match field {
            F::FirstName => v.name(value, "First name"),
            F::LastName => v.name(value, "Last name"),
            F::Age => v.age(value),
            F::Gender => v.gender(value),
            F::Weight => v.weight(value),
            F::Height => v.height(value),
            F::ActivityLevel => v.activity_level(value),
        }
    }

    fn check_form(&self) -> Result<(), FormErrors> {
        if self.to_update()?.is_empty() {
            return Err(FormErrors::single("profile", client::NO_CHANGES));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_skipped() {
        let mut form = ProfileForm::new();
        form.set(ProfileField::Weight, "72.5");
        form.set(ProfileField::Gender, "");
        let update = form.submit().unwrap();
        assert_eq!(update.weight, Some(72.5));
        assert_eq!(update.gender, None);

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "weight": 72.5 }));
        assert!(!update.changes_names());
    }

    #[test]
    fn filled_fields_are_still_validated() {
        let mut form = ProfileForm::new();
        form.set(ProfileField::Height, "300");
        let errors = form.submit().unwrap_err();
        assert_eq!(
            errors.get("height"),
            Some("Height must be between 100 and 250 cm")
        );
    }

    #[test]
    fn empty_update_is_rejected() {
        let mut form = ProfileForm::new();
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.first(), Some("Nothing to update"));
    }

    #[test]
    fn names_are_trimmed() {
        let mut form = ProfileForm::new();
        form.set(ProfileField::FirstName, "  Luis ");
        form.set(ProfileField::ActivityLevel, "1.80");
        let update = form.submit().unwrap();
        assert_eq!(update.first_name.as_deref(), Some("Luis"));
        assert_eq!(update.activity_level, Some(ActivityLevel::VeryActive));
        assert!(update.changes_names());
    }
}
