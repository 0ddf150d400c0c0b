//! `fitform register`, `fitform login` and `fitform logout`.

use serde_json::json;
use tracing::instrument;

use fitform_core::domain::{Form, LoginField, LoginForm, RegistrationField, RegistrationForm};

use crate::{
    app::App,
    cli::{LoginArgs, RegisterArgs},
    commands::profile::print_profile,
    error::CliResult,
    output::OutputManager,
    prompt,
};

#[instrument(skip_all)]
pub async fn register(args: RegisterArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut form = RegistrationForm::new();
    for (field, value) in given_fields(&args) {
        form.set(field, value);
    }
    if prompt::enabled(args.no_input) {
        prompt::complete_registration(&mut form, app.localizer())?;
    }

    let user = app
        .auth()
        .register(&mut form)
        .await
        .map_err(|e| app.fail(e))?;

    if output.is_json() {
        output.json(&user)?;
        return Ok(());
    }
    output.notifications(&app.ctx().drain_notifications())?;
    print_profile(&user, output)
}

#[instrument(skip_all)]
pub async fn login(args: LoginArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut form = LoginForm::new();
    if let Some(email) = &args.email {
        form.set(LoginField::Email, email.as_str());
    }
    if let Some(password) = &args.password {
        form.set(LoginField::Password, password.as_str());
    }
    if prompt::enabled(args.no_input) {
        prompt::complete_login(&mut form, app.localizer())?;
    }

    let session = app
        .auth()
        .login(&mut form)
        .await
        .map_err(|e| app.fail(e))?;

    if output.is_json() {
        output.json(&json!({
            "email": session.email,
            "started_at": session.started_at,
        }))?;
        return Ok(());
    }
    output.notifications(&app.ctx().drain_notifications())?;
    output.field("Email", &session.email)?;
    Ok(())
}

pub fn logout(app: &App, output: &OutputManager) -> CliResult<()> {
    let was_signed_in = app.ctx().is_signed_in();
    app.auth().logout().map_err(|e| app.fail(e))?;

    if output.is_json() {
        output.json(&json!({ "signed_out": was_signed_in }))?;
    } else if was_signed_in {
        output.success("Signed out")?;
    } else {
        output.info("No active session")?;
    }
    Ok(())
}

/// Registration fields passed as flags, in form order.
fn given_fields(args: &RegisterArgs) -> Vec<(RegistrationField, &str)> {
    use RegistrationField as F;
    [
        (F::Email, &args.email),
        (F::Password, &args.password),
        (F::FirstName, &args.first_name),
        (F::LastName, &args.last_name),
        (F::Age, &args.age),
        (F::Gender, &args.gender),
        (F::Weight, &args.weight),
        (F::Height, &args.height),
        (F::ActivityLevel, &args.activity_level),
        (F::Objective, &args.objective),
        (F::AggressivenessLevel, &args.aggressiveness_level),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_flags_are_set() {
        let args = RegisterArgs {
            email: Some("ana@example.com".into()),
            age: Some("30".into()),
            ..Default::default()
        };
        assert_eq!(
            given_fields(&args),
            vec![
                (RegistrationField::Email, "ana@example.com"),
                (RegistrationField::Age, "30"),
            ]
        );
    }
}
