//! `fitform validate`: check one field value without submitting anything.

use serde_json::json;

use fitform_core::domain::{Form, FormField, Localizer, RegistrationField, RegistrationForm};

use crate::{
    cli::ValidateArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ValidateArgs, localizer: Localizer, output: &OutputManager) -> CliResult<()> {
    let field = RegistrationField::from_key(args.field.trim()).ok_or_else(|| {
        let known: Vec<&str> = RegistrationField::ALL.iter().map(|f| f.key()).collect();
        CliError::InvalidInput {
            message: format!(
                "unknown field '{}', expected one of: {}",
                args.field,
                known.join(", ")
            ),
            source: None,
        }
    })?;

    let error = check(field, &args.value, localizer);

    if output.is_json() {
        output.json(&json!({
            "field": field.key(),
            "valid": error.is_none(),
            "error": error,
        }))?;
    }

    match error {
        None => {
            output.success(&format!("{}: ok", field.label()))?;
            Ok(())
        }
        Some(message) => Err(CliError::Rejected {
            field: field.key().to_string(),
            message,
        }),
    }
}

/// Localized failure for `value`, if any.
fn check(field: RegistrationField, value: &str, localizer: Localizer) -> Option<String> {
    let mut form = RegistrationForm::new();
    form.set(field, value);
    form.check(field)
        .error()
        .map(|e| localizer.translate(e).into_owned())
}
