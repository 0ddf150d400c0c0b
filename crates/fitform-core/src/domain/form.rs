//! Per-field form state.
//!
//! # Design
//!
//! A form keeps the raw text of every field plus a [`FieldStatus`]. Status
//! moves `Untouched -> Valid | Invalid`, can flip between `Valid` and
//! `Invalid` as the user edits, and only returns to `Untouched` on
//! [`Form::reset`].
//!
//! Concrete forms (see `entities/`) implement [`Form::check`]; everything
//! else (change/blur/submit handling, error collection) is provided here.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::localization::Localizer;
use crate::domain::validation::ValidationResult;

/// A field enum of a concrete form.
pub trait FormField: Copy + Ord + fmt::Debug + 'static {
    /// Every field, in display order.
    const ALL: &'static [Self];

    /// Wire/CLI key of the field (`"first_name"`).
    fn key(self) -> &'static str;
}

/// What caused a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Keystroke. Only re-validates fields already touched, unless the form
    /// validates eagerly.
    Change,
    Blur,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_touched(&self) -> bool {
        !matches!(self, Self::Untouched)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// Raw values and statuses for the fields of `F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<F: FormField> {
    values: BTreeMap<F, String>,
    status: BTreeMap<F, FieldStatus>,
    validate_on_change: bool,
}

impl<F: FormField> Default for FormState<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormField> FormState<F> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            status: BTreeMap::new(),
            validate_on_change: false,
        }
    }

    /// Validate every keystroke, even on untouched fields.
    pub fn validating_on_change(mut self) -> Self {
        self.validate_on_change = true;
        self
    }

    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn status(&self, field: F) -> &FieldStatus {
        const UNTOUCHED: &FieldStatus = &FieldStatus::Untouched;
        self.status.get(&field).unwrap_or(UNTOUCHED)
    }

    pub fn is_blank(&self, field: F) -> bool {
        self.value(field).trim().is_empty()
    }

    fn store(&mut self, field: F, value: String) {
        self.values.insert(field, value);
    }

    fn needs_check(&self, field: F, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Change => self.validate_on_change || self.status(field).is_touched(),
            Trigger::Blur | Trigger::Submit => true,
        }
    }

    fn record(&mut self, field: F, result: ValidationResult) {
        let status = match (result.is_valid, result.error) {
            (true, _) => FieldStatus::Valid,
            (false, Some(message)) => FieldStatus::Invalid(message),
            (false, None) => FieldStatus::Invalid(String::new()),
        };
        self.status.insert(field, status);
    }

    fn clear(&mut self) {
        self.values.clear();
        self.status.clear();
    }

    /// Fields currently marked invalid, in field order.
    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for (field, status) in &self.status {
            if let FieldStatus::Invalid(message) = status {
                errors.push(field.key(), message.clone());
            }
        }
        errors
    }
}

/// Behaviour shared by every form.
pub trait Form {
    type Field: FormField;

    fn state(&self) -> &FormState<Self::Field>;
    fn state_mut(&mut self) -> &mut FormState<Self::Field>;

    /// Validate one field against the current values.
    fn check(&self, field: Self::Field) -> ValidationResult;

    /// Cross-field checks run on submit after every field passed.
    fn check_form(&self) -> Result<(), FormErrors> {
        Ok(())
    }

    fn value(&self, field: Self::Field) -> &str {
        self.state().value(field)
    }

    fn status(&self, field: Self::Field) -> &FieldStatus {
        self.state().status(field)
    }

    /// Store a new raw value and re-validate if `trigger` calls for it.
    fn input(&mut self, field: Self::Field, value: impl Into<String>, trigger: Trigger) -> &FieldStatus {
        self.state_mut().store(field, value.into());
        self.validate(field, trigger)
    }

    /// Typing into a field.
    fn set(&mut self, field: Self::Field, value: impl Into<String>) -> &FieldStatus {
        self.input(field, value, Trigger::Change)
    }

    fn blur(&mut self, field: Self::Field) -> &FieldStatus {
        self.validate(field, Trigger::Blur)
    }

    fn validate(&mut self, field: Self::Field, trigger: Trigger) -> &FieldStatus {
        if self.state().needs_check(field, trigger) {
            let result = self.check(field);
            self.state_mut().record(field, result);
        }
        self.state().status(field)
    }

    /// Touch and validate every field. `Err` lists every hard failure.
    fn validate_all(&mut self) -> Result<(), FormErrors> {
        for &field in Self::Field::ALL {
            self.validate(field, Trigger::Submit);
        }
        let errors = self.state().errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.check_form()
    }

    fn is_valid(&self) -> bool {
        Self::Field::ALL.iter().all(|f| self.check(*f).is_valid) && self.check_form().is_ok()
    }

    fn reset(&mut self) {
        self.state_mut().clear();
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Hard failures found on submit, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    entries: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.iter().find(|(f, _)| *f == field).map(|(_, m)| m)
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, m)| m.as_str())
    }

    /// First error in the user's language, or the generic prompt.
    pub fn localized_summary(&self, localizer: &Localizer) -> String {
        localizer.message_or_generic(self.first())
    }

    /// Every error, translated, as `field: message` lines.
    pub fn localized_lines(&self, localizer: &Localizer) -> Vec<String> {
        self.iter()
            .map(|(field, message)| format!("{field}: {}", localizer.translate(message)))
            .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.iter().map(|(k, m)| format!("{k}: {m}")).collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl From<FormErrors> for crate::domain::DomainError {
    fn from(errors: FormErrors) -> Self {
        Self::InvalidForm {
            count: errors.len(),
            summary: errors.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        Code,
        Note,
    }

    impl FormField for Field {
        const ALL: &'static [Self] = &[Self::Code, Self::Note];

        fn key(self) -> &'static str {
            match self {
                Self::Code => "code",
                Self::Note => "note",
            }
        }
    }

    #[derive(Default)]
    struct CodeForm {
        state: FormState<Field>,
    }

    impl Form for CodeForm {
        type Field = Field;

        fn state(&self) -> &FormState<Field> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut FormState<Field> {
            &mut self.state
        }

        fn check(&self, field: Field) -> ValidationResult {
            match field {
                Field::Code if self.value(field).len() == 4 => ValidationResult::ok(),
                Field::Code => ValidationResult::fail("Code must be 4 characters"),
                Field::Note => ValidationResult::ok(),
            }
        }
    }

    #[test]
    fn change_does_not_validate_untouched_fields() {
        let mut form = CodeForm::default();
        assert_eq!(form.set(Field::Code, "12"), &FieldStatus::Untouched);
    }

    #[test]
    fn blur_touches_then_change_revalidates() {
        let mut form = CodeForm::default();
        form.set(Field::Code, "12");
        assert_eq!(
            form.blur(Field::Code),
            &FieldStatus::Invalid("Code must be 4 characters".into())
        );
        assert_eq!(form.set(Field::Code, "1234"), &FieldStatus::Valid);
        assert!(form.set(Field::Code, "123").error().is_some());
    }

    #[test]
    fn eager_forms_validate_on_every_change() {
        let mut form = CodeForm {
            state: FormState::new().validating_on_change(),
        };
        assert!(form.set(Field::Code, "1").error().is_some());
    }

    #[test]
    fn submit_touches_everything() {
        let mut form = CodeForm::default();
        let errors = form.validate_all().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("code"), Some("Code must be 4 characters"));
        assert!(form.status(Field::Note).is_valid());
    }

    #[test]
    fn only_reset_returns_to_untouched() {
        let mut form = CodeForm::default();
        form.input(Field::Code, "1234", Trigger::Blur);
        form.set(Field::Code, "");
        assert!(form.status(Field::Code).is_touched());
        form.reset();
        assert_eq!(form.status(Field::Code), &FieldStatus::Untouched);
        assert_eq!(form.value(Field::Code), "");
    }

    #[test]
    fn form_errors_summaries() {
        let mut errors = FormErrors::default();
        errors.push("password", "Password must be at least 8 characters");
        errors.push("age", "Something odd");
        let es = Localizer::spanish();
        assert_eq!(
            errors.localized_summary(&es),
            "La contraseña debe tener al menos 8 caracteres"
        );
        assert_eq!(errors.localized_lines(&es)[1], "age: Something odd");
        assert_eq!(
            FormErrors::default().localized_summary(&es),
            "Revisa el formulario e inténtalo de nuevo."
        );
    }
}
