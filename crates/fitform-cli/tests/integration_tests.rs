//! End-to-end runs of the `fitform` binary against the offline backend.

mod common;

use predicates::prelude::*;

use common::Sandbox;

#[test]
fn help_lists_commands() {
    Sandbox::new()
        .fitform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("skinfold"))
        .stdout(predicate::str::contains("progress"));
}

#[test]
fn version_matches_package() {
    Sandbox::new()
        .fitform()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn constraints_as_json() {
    Sandbox::new()
        .fitform()
        .args(["constraints", "--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_password_length\": 8"))
        .stdout(predicate::str::contains("fat_loss"));
}

#[test]
fn validate_accepts_a_good_value() {
    Sandbox::new()
        .fitform()
        .args(["validate", "activity_level", "1.50"])
        .assert()
        .success();
}

#[test]
fn validate_reports_json() {
    Sandbox::new()
        .fitform()
        .args(["validate", "email", "ana@example.com", "--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn meal_parse_offline() {
    Sandbox::new()
        .fitform()
        .args(["--offline", "meal", "parse", "200 g de arroz"])
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_calories\": 260.0"));
}

#[test]
fn login_then_progress_reuses_the_session() {
    let sandbox = Sandbox::new();

    sandbox
        .fitform()
        .args(["--offline", "login", "--no-input"])
        .args(["--email", "demo@fitform.app", "--password", "demo12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sesión iniciada"));
    assert!(sandbox.path().join("session.json").exists());

    sandbox
        .fitform()
        .args(["--offline", "progress", "--period", "mes", "--timeline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score"))
        .stdout(predicate::str::contains("Peso (kg)"));

    sandbox
        .fitform()
        .args(["--offline", "profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo@fitform.app"));

    sandbox
        .fitform()
        .args(["--offline", "logout"])
        .assert()
        .success();
    assert!(!sandbox.path().join("session.json").exists());
}

#[test]
fn skinfold_calc_with_all_sites() {
    let sandbox = Sandbox::new();
    sandbox
        .fitform()
        .args(["--offline", "login", "--no-input"])
        .args(["--email", "demo@fitform.app", "--password", "demo12345"])
        .assert()
        .success();

    sandbox
        .fitform()
        .args(["--offline", "skinfold", "calc", "--sex", "male", "--age", "30"])
        .args(["--chest", "10/12", "--midaxillary", "11", "--triceps", "11"])
        .args(["--subscapular", "11", "--abdomen", "11", "--suprailiac", "11"])
        .args(["--thigh", "11", "--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sum_of_skinfolds_mm\": 77.0"))
        .stdout(predicate::str::contains("Jackson-Pollock 7"));
}

#[test]
fn completions_name_the_binary() {
    Sandbox::new()
        .fitform()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fitform"));
}

#[test]
fn init_writes_a_loadable_config() {
    let sandbox = Sandbox::new();
    let path = sandbox.path().join("fitform.toml");
    let path_arg = path.to_str().expect("utf-8 temp path");

    sandbox
        .fitform()
        .args(["--config", path_arg, "init"])
        .assert()
        .success();
    assert!(path.exists());

    sandbox
        .fitform()
        .args(["--config", path_arg, "config", "get", "api.base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000"));
}

#[test]
fn env_overrides_the_locale() {
    Sandbox::new()
        .fitform()
        .env("FITFORM_LOCALE", "en")
        .args(["validate", "password", "short"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Password must be at least 8 characters"));
}

#[test]
fn no_color_env_accepts_any_value() {
    for value in ["1", "yes", "0"] {
        Sandbox::new()
            .fitform()
            .env("NO_COLOR", value)
            .args(["validate", "age", "30"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Age"));
    }
}

#[test]
fn activity_level_rejects_near_misses() {
    Sandbox::new()
        .fitform()
        .args(["validate", "activity_level", "1.5000000000001"])
        .assert()
        .code(2);
}
