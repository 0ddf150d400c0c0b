use serde::Serialize;

use crate::domain::constraints::Constraints;
use crate::domain::form::{Form, FormErrors, FormField, FormState};
use crate::domain::validation::{FieldValidator, ValidationResult, messages};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[Self::Email, Self::Password];

    fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Credentials sent to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Email + password. Password strength is not checked here: an account
/// created under older rules must still be able to sign in.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    state: FormState<LoginField>,
    validator: FieldValidator,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraints(constraints: Constraints) -> Self {
        Self {
            state: FormState::new(),
            validator: FieldValidator::new(constraints),
        }
    }

    pub fn filled(email: impl Into<String>, password: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.set(LoginField::Email, email);
        form.set(LoginField::Password, password);
        form
    }

    /// Validate and build the payload. The password is cut to the hashing
    /// limit on a character boundary.
    pub fn submit(&mut self) -> Result<LoginPayload, FormErrors> {
        self.validate_all()?;
        Ok(LoginPayload {
            email: self.value(LoginField::Email).trim().to_string(),
            password: self
                .validator
                .truncate_password(self.value(LoginField::Password)),
        })
    }
}

impl Form for LoginForm {
    type Field = LoginField;

    fn state(&self) -> &FormState<LoginField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<LoginField> {
        &mut self.state
    }

    fn check(&self, field: LoginField) -> ValidationResult {
        let value = self.value(field);
        match field {
            LoginField::Email => self.validator.email(value.trim()),
            LoginField::Password if value.is_empty() => {
                ValidationResult::fail(messages::PASSWORD_REQUIRED)
            }
            LoginField::Password => ValidationResult::ok(),
        }
    }
}
