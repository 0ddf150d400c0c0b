use serde::Serialize;

use super::{activity, integer, number, parsed};
use crate::domain::constraints::Constraints;
use crate::domain::form::{Form, FormErrors, FormField, FormState};
use crate::domain::validation::{
    FieldValidator, RegistrationInput, ValidationResult, fields,
};
use crate::domain::value_objects::{
    ActivityLevel, AggressivenessLevel, FitnessObjective, Gender,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    Email,
    Password,
    FirstName,
    LastName,
    Age,
    Gender,
    Weight,
    Height,
    ActivityLevel,
    Objective,
    AggressivenessLevel,
}

impl FormField for RegistrationField {
    const ALL: &'static [Self] = &[
        Self::Email,
        Self::Password,
        Self::FirstName,
        Self::LastName,
        Self::Age,
        Self::Gender,
        Self::Weight,
        Self::Height,
        Self::ActivityLevel,
        Self::Objective,
        Self::AggressivenessLevel,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Email => fields::EMAIL,
            Self::Password => fields::PASSWORD,
            Self::FirstName => fields::FIRST_NAME,
            Self::LastName => fields::LAST_NAME,
            Self::Age => fields::AGE,
            Self::Gender => fields::GENDER,
            Self::Weight => fields::WEIGHT,
            Self::Height => fields::HEIGHT,
            Self::ActivityLevel => fields::ACTIVITY_LEVEL,
            Self::Objective => fields::OBJECTIVE,
            Self::AggressivenessLevel => fields::AGGRESSIVENESS_LEVEL,
        }
    }
}

impl RegistrationField {
    /// Look a field up by its wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Weight => "Weight (kg)",
            Self::Height => "Height (cm)",
            Self::ActivityLevel => "Activity level",
            Self::Objective => "Objective",
            Self::AggressivenessLevel => "Aggressiveness level",
        }
    }
}

/// Typed registration body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationPayload {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub objective: FitnessObjective,
    pub aggressiveness_level: AggressivenessLevel,
}

/// Sign-up form. Every field is required.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    state: FormState<RegistrationField>,
    validator: FieldValidator,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraints(constraints: Constraints) -> Self {
        Self {
            state: FormState::new(),
            validator: FieldValidator::new(constraints),
        }
    }

    /// Raw values as the composite validator expects them.
    pub fn to_input(&self) -> RegistrationInput {
        use RegistrationField as F;
        let v = |f: F| self.value(f).to_string();
        RegistrationInput {
            email: v(F::Email).trim().to_string(),
            password: v(F::Password),
            first_name: v(F::FirstName),
            last_name: v(F::LastName),
            age: v(F::Age),
            gender: v(F::Gender),
            weight: v(F::Weight),
            height: v(F::Height),
            activity_level: v(F::ActivityLevel),
            objective: v(F::Objective),
            aggressiveness_level: v(F::AggressivenessLevel),
        }
    }

    /// Validate every field and build the payload.
    pub fn submit(&mut self) -> Result<RegistrationPayload, FormErrors> {
        self.validate_all()?;
        let input = self.to_input();

        use RegistrationField as F;
        Ok(RegistrationPayload {
            email: input.email,
            password: input.password,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            age: integer(F::Age, &input.age)?,
            gender: parsed(F::Gender, &input.gender)?,
            weight: number(F::Weight, &input.weight)?,
            height: number(F::Height, &input.height)?,
            activity_level: activity(F::ActivityLevel, &input.activity_level)?,
            objective: parsed(F::Objective, &input.objective)?,
            aggressiveness_level: integer(F::AggressivenessLevel, &input.aggressiveness_level)
                .and_then(|v| {
                    AggressivenessLevel::try_from(v).map_err(|e| {
                        FormErrors::single(F::AggressivenessLevel.key(), e.to_string())
                    })
                })?,
        })
    }
}

impl Form for RegistrationForm {
    type Field = RegistrationField;

    fn state(&self) -> &FormState<RegistrationField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<RegistrationField> {
        &mut self.state
    }

    fn check(&self, field: RegistrationField) -> ValidationResult {
        use RegistrationField as F;
        let value = self.value(field);
        let v = &self.validator;
        match field {
            F::Email => v.email(value.trim()),
            F::Password => v.password(value),
            F::FirstName => v.name(value, "First name"),
            F::LastName => v.name(value, "Last name"),
            F::Age => v.age(value),
            F::Gender => v.gender(value),
            F::Weight => v.weight(value),
            F::Height => v.height(value),
            F::ActivityLevel => v.activity_level(value),
            F::Objective => v.objective(value.trim()),
            F::AggressivenessLevel => v.aggressiveness_level(value),
        }
    }

    /// The composite pass must agree with the per-field checks.
    fn check_form(&self) -> Result<(), FormErrors> {
        let report = self.validator.user_registration(&self.to_input());
        if report.is_valid {
            return Ok(());
        }
        let mut errors = FormErrors::default();
        for (field, message) in report.errors {
            errors.push(field, message);
        }
        Err(errors)
    }
}
