//! Field validators.
//!
//! Every check is total: it never panics and never returns `Err`. Callers get
//! a [`ValidationResult`] and decide whether to block a submit or just show
//! the message inline.
//!
//! The free functions (`validate_age`, ...) use [`Constraints::STANDARD`].
//! [`FieldValidator`] binds the same checks to any other constraint table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::constraints::Constraints;
use crate::domain::value_objects::{
    ActivityLevel, AggressivenessLevel, FitnessObjective, Gender,
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

// ── Result type ──────────────────────────────────────────────────────────────

/// Outcome of a single field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Only meaningful when `is_valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|_| !self.is_valid)
    }
}

// ── Raw input ────────────────────────────────────────────────────────────────

/// Raw field input: whatever the user typed, or a number from elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u8> for RawValue<'_> {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Why an integer parse failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegerIssue {
    NotANumber,
    Fractional,
}

impl RawValue<'_> {
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Finite float, or `None`. Text is trimmed first.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Number(n) => *n,
        };
        value.is_finite().then_some(value)
    }

    /// Integral value, or `None`. `"42"` and `"42.0"` both give 42.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().ok()
    }

    fn as_integer(&self) -> Result<i64, IntegerIssue> {
        if let Self::Text(s) = self {
            if let Ok(v) = s.trim().parse::<i64>() {
                return Ok(v);
            }
        }
        let value = self.as_f64().ok_or(IntegerIssue::NotANumber)?;
        if value.fract() != 0.0 {
            return Err(IntegerIssue::Fractional);
        }
        if value.abs() > i64::MAX as f64 {
            return Err(IntegerIssue::NotANumber);
        }
        Ok(value as i64)
    }
}

// ── Messages ─────────────────────────────────────────────────────────────────

/// English messages produced by the validators.
///
/// Kept as functions of the constraint table so the localization table can
/// be built from exactly the same strings.
pub mod messages {
    use crate::domain::constraints::Constraints;
    use crate::domain::value_objects::{ActivityLevel, FitnessObjective};

    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Invalid email format";
    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const AGE_NOT_A_NUMBER: &str = "Age must be a number";
    pub const AGE_NOT_WHOLE: &str = "Age must be a whole number";
    pub const WEIGHT_NOT_A_NUMBER: &str = "Weight must be a number";
    pub const HEIGHT_NOT_A_NUMBER: &str = "Height must be a number";
    pub const ACTIVITY_NOT_A_NUMBER: &str = "Activity level must be a number";
    pub const GENDER_REQUIRED: &str = "Gender is required";
    pub const GENDER_INVALID: &str = "Gender must be one of: male, female";
    pub const OBJECTIVE_REQUIRED: &str = "Objective is required";
    pub const AGGRESSIVENESS_NOT_A_NUMBER: &str = "Aggressiveness level must be a number";
    pub const AGGRESSIVENESS_INVALID: &str = "Aggressiveness level must be 1, 2 or 3";

    pub fn email_too_long(c: &Constraints) -> String {
        format!("Email cannot exceed {} characters", c.max_email_length)
    }

    pub fn password_too_short(c: &Constraints) -> String {
        format!(
            "Password must be at least {} characters",
            c.min_password_length
        )
    }

    pub fn password_too_long(c: &Constraints) -> String {
        format!("Password cannot exceed {} bytes", c.password_byte_limit)
    }

    pub fn name_required(label: &str) -> String {
        format!("{label} is required")
    }

    pub fn name_too_long(label: &str, c: &Constraints) -> String {
        format!("{label} cannot exceed {} characters", c.max_name_length)
    }

    pub fn age_range(c: &Constraints) -> String {
        format!("Age must be between {} and {}", c.min_age, c.max_age)
    }

    pub fn weight_range(c: &Constraints) -> String {
        format!(
            "Weight must be between {} and {} kg",
            c.min_weight_kg, c.max_weight_kg
        )
    }

    pub fn height_range(c: &Constraints) -> String {
        format!(
            "Height must be between {} and {} cm",
            c.min_height_cm, c.max_height_cm
        )
    }

    pub fn activity_invalid() -> String {
        let levels: Vec<String> = ActivityLevel::ALL.iter().map(|l| l.to_string()).collect();
        format!("Activity level must be one of: {}", levels.join(", "))
    }

    pub fn objective_invalid() -> String {
        let names: Vec<&str> = FitnessObjective::ALL.iter().map(|o| o.as_str()).collect();
        format!("Objective must be one of: {}", names.join(", "))
    }
}

// ── Validator ────────────────────────────────────────────────────────────────

/// Field checks bound to a constraint table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldValidator {
    constraints: Constraints,
}

impl FieldValidator {
    pub const fn new(constraints: Constraints) -> Self {
        Self { constraints }
    }

    pub const fn standard() -> Self {
        Self::new(Constraints::STANDARD)
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn email(&self, email: &str) -> ValidationResult {
        if email.is_empty() {
            return ValidationResult::fail(messages::EMAIL_REQUIRED);
        }
        if email.chars().count() > self.constraints.max_email_length {
            return ValidationResult::fail(messages::email_too_long(&self.constraints));
        }
        if !EMAIL_PATTERN.is_match(email) {
            return ValidationResult::fail(messages::EMAIL_INVALID);
        }
        ValidationResult::ok()
    }

    pub fn password(&self, password: &str) -> ValidationResult {
        if password.is_empty() {
            return ValidationResult::fail(messages::PASSWORD_REQUIRED);
        }
        if password.chars().count() < self.constraints.min_password_length {
            return ValidationResult::fail(messages::password_too_short(&self.constraints));
        }
        if password.len() > self.constraints.password_byte_limit {
            return ValidationResult::fail(messages::password_too_long(&self.constraints));
        }
        ValidationResult::ok()
    }

    /// `label` is the human field name used in the message ("First name").
    pub fn name(&self, name: &str, label: &str) -> ValidationResult {
        if name.trim().is_empty() {
            return ValidationResult::fail(messages::name_required(label));
        }
        if name.chars().count() > self.constraints.max_name_length {
            return ValidationResult::fail(messages::name_too_long(label, &self.constraints));
        }
        ValidationResult::ok()
    }

    pub fn age<'a>(&self, input: impl Into<RawValue<'a>>) -> ValidationResult {
        match input.into().as_integer() {
            Err(IntegerIssue::NotANumber) => ValidationResult::fail(messages::AGE_NOT_A_NUMBER),
            Err(IntegerIssue::Fractional) => ValidationResult::fail(messages::AGE_NOT_WHOLE),
            Ok(age) if !self.constraints.age_in_range(age) => {
                ValidationResult::fail(messages::age_range(&self.constraints))
            }
            Ok(_) => ValidationResult::ok(),
        }
    }

    pub fn weight<'a>(&self, input: impl Into<RawValue<'a>>) -> ValidationResult {
        match input.into().as_f64() {
            None => ValidationResult::fail(messages::WEIGHT_NOT_A_NUMBER),
            Some(kg) if !self.constraints.weight_in_range(kg) => {
                ValidationResult::fail(messages::weight_range(&self.constraints))
            }
            Some(_) => ValidationResult::ok(),
        }
    }

    pub fn height<'a>(&self, input: impl Into<RawValue<'a>>) -> ValidationResult {
        match input.into().as_f64() {
            None => ValidationResult::fail(messages::HEIGHT_NOT_A_NUMBER),
            Some(cm) if !self.constraints.height_in_range(cm) => {
                ValidationResult::fail(messages::height_range(&self.constraints))
            }
            Some(_) => ValidationResult::ok(),
        }
    }

    pub fn activity_level<'a>(&self, input: impl Into<RawValue<'a>>) -> ValidationResult {
        match input.into().as_f64() {
            None => ValidationResult::fail(messages::ACTIVITY_NOT_A_NUMBER),
            Some(value) => match ActivityLevel::from_multiplier(value) {
                Some(level) if self.constraints.activity_levels().contains(&level) => {
                    ValidationResult::ok()
                }
                _ => ValidationResult::fail(messages::activity_invalid()),
            },
        }
    }

    pub fn gender(&self, gender: &str) -> ValidationResult {
        if gender.trim().is_empty() {
            return ValidationResult::fail(messages::GENDER_REQUIRED);
        }
        match gender.parse::<Gender>() {
            Ok(_) => ValidationResult::ok(),
            Err(_) => ValidationResult::fail(messages::GENDER_INVALID),
        }
    }

    pub fn objective(&self, objective: &str) -> ValidationResult {
        if objective.trim().is_empty() {
            return ValidationResult::fail(messages::OBJECTIVE_REQUIRED);
        }
        match objective.parse::<FitnessObjective>() {
            Ok(o) if self.constraints.objectives().contains(&o) => ValidationResult::ok(),
            _ => ValidationResult::fail(messages::objective_invalid()),
        }
    }

    pub fn aggressiveness_level<'a>(&self, input: impl Into<RawValue<'a>>) -> ValidationResult {
        match input.into().as_integer() {
            Err(_) => ValidationResult::fail(messages::AGGRESSIVENESS_NOT_A_NUMBER),
            Ok(value) => match AggressivenessLevel::try_from(value) {
                Ok(_) => ValidationResult::ok(),
                Err(_) => ValidationResult::fail(messages::AGGRESSIVENESS_INVALID),
            },
        }
    }

    /// Composite pass over a whole registration payload.
    pub fn user_registration(&self, input: &RegistrationInput) -> RegistrationReport {
        let checks = [
            (fields::EMAIL, self.email(&input.email)),
            (fields::PASSWORD, self.password(&input.password)),
            (fields::FIRST_NAME, self.name(&input.first_name, "First name")),
            (fields::LAST_NAME, self.name(&input.last_name, "Last name")),
            (fields::AGE, self.age(&input.age)),
            (fields::GENDER, self.gender(&input.gender)),
            (fields::WEIGHT, self.weight(&input.weight)),
            (fields::HEIGHT, self.height(&input.height)),
            (fields::ACTIVITY_LEVEL, self.activity_level(&input.activity_level)),
            (fields::OBJECTIVE, self.objective(&input.objective)),
            (
                fields::AGGRESSIVENESS_LEVEL,
                self.aggressiveness_level(&input.aggressiveness_level),
            ),
        ];

        let errors: BTreeMap<&'static str, String> = checks
            .into_iter()
            .filter(|(_, result)| !result.is_valid)
            .filter_map(|(field, result)| result.error.map(|e| (field, e)))
            .collect();

        RegistrationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Cut a password to the byte limit without splitting a character.
    pub fn truncate_password(&self, password: &str) -> String {
        truncate_to_bytes(password, self.constraints.password_byte_limit).into_owned()
    }
}

/// Wire names of the registration fields.
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const WEIGHT: &str = "weight";
    pub const HEIGHT: &str = "height";
    pub const ACTIVITY_LEVEL: &str = "activity_level";
    pub const OBJECTIVE: &str = "objective";
    pub const AGGRESSIVENESS_LEVEL: &str = "aggressiveness_level";
}

// ── Registration ─────────────────────────────────────────────────────────────

/// Raw registration input, one string per field, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub activity_level: String,
    pub objective: String,
    pub aggressiveness_level: String,
}

/// Result of [`validate_user_registration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<&'static str, String>,
}

// ── Free functions (standard constraints) ────────────────────────────────────

const STANDARD: FieldValidator = FieldValidator::standard();

pub fn validate_email(email: &str) -> ValidationResult {
    STANDARD.email(email)
}

pub fn validate_password(password: &str) -> ValidationResult {
    STANDARD.password(password)
}

pub fn validate_name(name: &str, label: &str) -> ValidationResult {
    STANDARD.name(name, label)
}

pub fn validate_age<'a>(input: impl Into<RawValue<'a>>) -> ValidationResult {
    STANDARD.age(input)
}

pub fn validate_weight<'a>(input: impl Into<RawValue<'a>>) -> ValidationResult {
    STANDARD.weight(input)
}

pub fn validate_height<'a>(input: impl Into<RawValue<'a>>) -> ValidationResult {
    STANDARD.height(input)
}

pub fn validate_activity_level<'a>(input: impl Into<RawValue<'a>>) -> ValidationResult {
    STANDARD.activity_level(input)
}

pub fn validate_gender(gender: &str) -> ValidationResult {
    STANDARD.gender(gender)
}

pub fn validate_objective(objective: &str) -> ValidationResult {
    STANDARD.objective(objective)
}

pub fn validate_aggressiveness_level<'a>(input: impl Into<RawValue<'a>>) -> ValidationResult {
    STANDARD.aggressiveness_level(input)
}

pub fn validate_user_registration(input: &RegistrationInput) -> RegistrationReport {
    STANDARD.user_registration(input)
}

/// Truncate to the bcrypt byte limit on a character boundary. Idempotent.
pub fn truncate_password_if_needed(password: &str) -> String {
    STANDARD.truncate_password(password)
}

fn truncate_to_bytes(s: &str, limit: usize) -> Cow<'_, str> {
    if s.len() <= limit {
        return Cow::Borrowed(s);
    }
    // A &str always has a boundary at 0, so this never falls through.
    let end = (0..=limit).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    Cow::Borrowed(&s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_checks_in_order() {
        assert_eq!(validate_email("").error(), Some("Email is required"));
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long).error(),
            Some("Email cannot exceed 254 characters")
        );
        assert_eq!(validate_email("no-at-sign").error(), Some("Invalid email format"));
        assert!(!validate_email("a@-bad.com").is_valid());
        assert!(validate_email("ana.perez+fit@mail.example.com").is_valid());
        assert!(validate_email("user@localhost").is_valid());
    }

    #[test]
    fn password_rules() {
        assert_eq!(validate_password("").error(), Some("Password is required"));
        assert_eq!(
            validate_password("short").error(),
            Some("Password must be at least 8 characters")
        );
        assert!(validate_password("12345678").is_valid());
        // 36 two-byte characters = 72 bytes, still fine
        assert!(validate_password(&"ñ".repeat(36)).is_valid());
        assert_eq!(
            validate_password(&"ñ".repeat(37)).error(),
            Some("Password cannot exceed 72 bytes")
        );
    }

    #[test]
    fn name_rules() {
        assert_eq!(
            validate_name("   ", "First name").error(),
            Some("First name is required")
        );
        assert!(!validate_name(&"x".repeat(101), "Last name").is_valid());
        assert!(validate_name(&"x".repeat(100), "Last name").is_valid());
    }

    #[test]
    fn age_bounds_are_inclusive() {
        for age in 1..=120 {
            assert!(validate_age(age).is_valid(), "age {age} should pass");
        }
        for age in [-5, 0, 121, 500] {
            assert!(!validate_age(age).is_valid(), "age {age} should fail");
        }
        assert_eq!(validate_age("abc").error(), Some("Age must be a number"));
        assert_eq!(validate_age("").error(), Some("Age must be a number"));
        assert_eq!(validate_age("30.5").error(), Some("Age must be a whole number"));
        assert!(validate_age(" 42 ").is_valid());
        assert!(validate_age("42.0").is_valid());
    }

    #[test]
    fn weight_bounds_are_inclusive() {
        assert!(validate_weight(20.0).is_valid());
        assert!(validate_weight(300.0).is_valid());
        assert!(!validate_weight(19.999).is_valid());
        assert!(!validate_weight(300.001).is_valid());
        assert_eq!(
            validate_weight("heavy").error(),
            Some("Weight must be a number")
        );
        assert!(!validate_weight("NaN").is_valid());
        assert!(!validate_weight("inf").is_valid());
    }

    #[test]
    fn weight_parse_is_stable() {
        let raw = "72.5";
        assert!(validate_weight(raw).is_valid());
        let parsed: f64 = raw.parse().unwrap();
        assert!(validate_weight(parsed).is_valid());
        assert!(validate_weight(parsed.to_string().as_str()).is_valid());
    }

    #[test]
    fn height_bounds() {
        assert!(validate_height("100").is_valid());
        assert!(validate_height("250").is_valid());
        assert_eq!(
            validate_height("99.9").error(),
            Some("Height must be between 100 and 250 cm")
        );
    }

    #[test]
    fn activity_level_has_no_tolerance() {
        assert!(validate_activity_level(1.50).is_valid());
        assert!(validate_activity_level("1.50").is_valid());
        assert!(validate_activity_level("1.2").is_valid());
        assert!(!validate_activity_level(1.45).is_valid());
        assert!(!validate_activity_level(1.5000000000001).is_valid());
        assert!(!validate_activity_level("1.50000000000009").is_valid());
        assert_eq!(
            validate_activity_level("1.45").error(),
            Some("Activity level must be one of: 1.20, 1.35, 1.50, 1.65, 1.80")
        );
        assert_eq!(
            validate_activity_level("fast").error(),
            Some("Activity level must be a number")
        );
    }

    #[test]
    fn gender_and_objective() {
        assert_eq!(validate_gender("").error(), Some("Gender is required"));
        assert!(validate_gender("Female").is_valid());
        assert!(!validate_gender("x").is_valid());
        assert_eq!(
            validate_gender(" male ").error(),
            Some("Gender must be one of: male, female")
        );
        assert_eq!(validate_objective("").error(), Some("Objective is required"));
        assert!(validate_objective("muscle_gain").is_valid());
        assert!(!validate_objective("Muscle Gain").is_valid());
    }

    #[test]
    fn aggressiveness_exactly_one_two_three() {
        assert!(validate_aggressiveness_level("1").is_valid());
        assert!(validate_aggressiveness_level(3).is_valid());
        assert!(!validate_aggressiveness_level(0).is_valid());
        assert!(!validate_aggressiveness_level("2.5").is_valid());
        assert_eq!(
            validate_aggressiveness_level("4").error(),
            Some("Aggressiveness level must be 1, 2 or 3")
        );
    }

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            email: "ana@example.com".into(),
            password: "supersecret".into(),
            first_name: "Ana".into(),
            last_name: "Pérez".into(),
            age: "29".into(),
            gender: "female".into(),
            weight: "61.5".into(),
            height: "168".into(),
            activity_level: "1.35".into(),
            objective: "fat_loss".into(),
            aggressiveness_level: "2".into(),
        }
    }

    #[test]
    fn registration_passes_for_valid_input() {
        let report = validate_user_registration(&valid_input());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn registration_collects_every_error() {
        let input = RegistrationInput {
            password: "short".into(),
            age: "0".into(),
            activity_level: "1.45".into(),
            ..valid_input()
        };
        let report = validate_user_registration(&input);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(
            report.errors["password"],
            "Password must be at least 8 characters"
        );
        assert!(report.errors.contains_key("age"));
        assert!(report.errors.contains_key("activity_level"));
    }

    #[test]
    fn truncate_leaves_short_passwords_alone() {
        assert_eq!(truncate_password_if_needed("hunter22"), "hunter22");
        let exact = "a".repeat(72);
        assert_eq!(truncate_password_if_needed(&exact), exact);
    }

    #[test]
    fn truncate_never_splits_a_character() {
        // 71 ASCII bytes + a 2-byte char straddles the limit
        let input = format!("{}ñabc", "a".repeat(71));
        let out = truncate_password_if_needed(&input);
        assert_eq!(out.len(), 71);
        assert!(out.chars().all(|c| c == 'a'));

        let emoji = "💪".repeat(30); // 4 bytes each
        let out = truncate_password_if_needed(&emoji);
        assert_eq!(out.len(), 72);
        assert_eq!(out.chars().count(), 18);
    }

    #[test]
    fn truncate_is_idempotent_and_bounded() {
        let samples = [
            String::new(),
            "x".repeat(200),
            "ñ".repeat(50),
            format!("{}€€€", "b".repeat(70)),
            "💪a".repeat(40),
        ];
        for s in samples {
            let once = truncate_password_if_needed(&s);
            let twice = truncate_password_if_needed(&once);
            assert_eq!(once, twice);
            assert!(once.len() <= 72);
            assert!(s.starts_with(&once));
        }
    }

    #[test]
    fn custom_constraints_change_the_bounds() {
        let strict = FieldValidator::new(Constraints {
            min_age: 18,
            ..Constraints::STANDARD
        });
        assert!(!strict.age(17).is_valid());
        assert_eq!(strict.age(17).error(), Some("Age must be between 18 and 120"));
        assert!(strict.age(18).is_valid());
    }

    #[test]
    fn result_serialises_camel_case() {
        let json = serde_json::to_value(ValidationResult::fail("nope")).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["error"], "nope");
    }
}
