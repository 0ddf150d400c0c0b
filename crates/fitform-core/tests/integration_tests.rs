//! Integration tests for fitform-core: public API only.

use fitform_core::domain::{
    Constraints, Form, FormErrors, Localizer, ProfileField, Readiness, RegistrationField,
    SkinfoldField, SkinfoldSheet, average_readings, truncate_password_if_needed,
    validate_activity_level, validate_age, validate_weight,
};
use fitform_core::prelude::*;

fn registration(password: &str) -> RegistrationForm {
    let mut form = RegistrationForm::new();
    for (field, value) in [
        (RegistrationField::Email, "luis@example.com"),
        (RegistrationField::Password, password),
        (RegistrationField::FirstName, "Luis"),
        (RegistrationField::LastName, "Gómez"),
        (RegistrationField::Age, "41"),
        (RegistrationField::Gender, "male"),
        (RegistrationField::Weight, "82.3"),
        (RegistrationField::Height, "178"),
        (RegistrationField::ActivityLevel, "1.35"),
        (RegistrationField::Objective, "body_recomp"),
        (RegistrationField::AggressivenessLevel, "3"),
    ] {
        form.set(field, value);
    }
    form
}

#[test]
fn test_registration_payload_matches_backend_contract() {
    let payload = registration("supersecret").submit().unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["email"], "luis@example.com");
    assert_eq!(json["gender"], "male");
    assert_eq!(json["activity_level"], 1.35);
    assert_eq!(json["objective"], "body_recomp");
    assert_eq!(json["aggressiveness_level"], 3);
}

#[test]
fn test_short_password_blocks_with_spanish_summary() {
    let errors: FormErrors = registration("short").submit().unwrap_err();
    let summary = errors.localized_summary(&Localizer::spanish());
    assert!(summary.contains("al menos 8 caracteres"), "{summary}");
}

#[test]
fn test_field_status_recovers_after_correction() {
    let mut form = RegistrationForm::new();
    form.blur(RegistrationField::Age);
    assert!(form.status(RegistrationField::Age).error().is_some());

    form.set(RegistrationField::Age, "35");
    assert!(form.status(RegistrationField::Age).is_valid());
}

#[test]
fn test_boundaries_follow_constraint_table() {
    let c = Constraints::STANDARD;
    assert!(validate_age(c.min_age).is_valid);
    assert!(validate_age(c.max_age).is_valid);
    assert!(!validate_age(c.max_age + 1).is_valid);
    assert!(validate_weight(c.min_weight_kg).is_valid);
    assert!(!validate_weight(c.max_weight_kg + 0.01).is_valid);
    assert!(validate_activity_level(1.50).is_valid);
    assert!(!validate_activity_level(1.45).is_valid);
}

#[test]
fn test_truncation_is_idempotent_on_multibyte_input() {
    let long = "ñ".repeat(50);
    let once = truncate_password_if_needed(&long);
    assert!(once.len() <= 72);
    assert_eq!(truncate_password_if_needed(&once), once);
}

#[test]
fn test_skinfold_gate_and_request() {
    assert_eq!(average_readings(&["10", "12", ""]), Some(11.0));

    let mut sheet = SkinfoldSheet::new();
    for &site in &SkinfoldSite::ALL[..5] {
        sheet.set_readings(site, ["9"]);
    }
    assert_eq!(sheet.readiness(), Readiness::Missing(2));

    let mut form = SkinfoldForm::new();
    form.set(SkinfoldField::Sex, "female");
    form.set(SkinfoldField::Age, "27");
    for &site in SkinfoldSite::ALL {
        form.set_readings(site, ["14", "15"]);
    }
    assert!(form.can_calculate());

    let submission = form.submit().unwrap();
    let json = serde_json::to_value(&submission.request).unwrap();
    assert_eq!(json["triceps_mm"], 14.5);
    assert_eq!(json["measurement_unit"], "mm");
    assert!(json.get("weight_kg").is_none());
}

#[test]
fn test_profile_update_omits_blank_fields() {
    let mut form = ProfileForm::new();
    form.set(ProfileField::Height, "181");
    let update = form.submit().unwrap();
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        serde_json::json!({ "height": 181.0 })
    );
}

#[test]
fn test_error_categories_cover_api_failures() {
    let err = FitformError::from(ApiError::from_response(404, r#"{"detail":"User not found"}"#));
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(!err.is_retryable());
}

#[test]
fn test_constraint_schema_is_serializable() {
    let schema = Constraints::STANDARD.schema();
    assert!(schema.is_object());
    let back: Constraints = serde_json::from_value(serde_json::to_value(Constraints::STANDARD).unwrap()).unwrap();
    assert_eq!(back, Constraints::STANDARD);
}
