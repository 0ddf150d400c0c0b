//! Interactive prompts for fields missing from the command line.
//!
//! Prompts only run when stdin and stderr are terminals and `--no-input` was
//! not given. Every answer is checked with the same rule the form applies on
//! submit, so a typo is re-asked instead of failing the whole command.

use std::io::{self, IsTerminal};

use fitform_core::domain::{LoginForm, Localizer, RegistrationForm};

use crate::error::CliResult;

/// Whether missing fields should be asked for.
pub fn enabled(no_input: bool) -> bool {
    cfg!(feature = "interactive")
        && !no_input
        && io::stdin().is_terminal()
        && io::stderr().is_terminal()
}

/// Ask for every blank registration field.
#[cfg(feature = "interactive")]
pub fn complete_registration(form: &mut RegistrationForm, localizer: Localizer) -> CliResult<()> {
    use fitform_core::domain::{Form, FormField, RegistrationField};

    for &field in RegistrationField::ALL {
        if !form.value(field).trim().is_empty() {
            continue;
        }
        let answer = match choices(field) {
            Some(options) => interactive::choose(field.label(), &options)?,
            None if field == RegistrationField::Password => {
                interactive::secret(field.label(), form, field, localizer)?
            }
            None => interactive::text(field.label(), form, field, localizer)?,
        };
        form.set(field, answer);
    }
    Ok(())
}

#[cfg(not(feature = "interactive"))]
pub fn complete_registration(_form: &mut RegistrationForm, _localizer: Localizer) -> CliResult<()> {
    Ok(())
}

/// Ask for a blank email or password.
#[cfg(feature = "interactive")]
pub fn complete_login(form: &mut LoginForm, localizer: Localizer) -> CliResult<()> {
    use fitform_core::domain::{Form, LoginField};

    if form.value(LoginField::Email).trim().is_empty() {
        let email = interactive::text("Email", form, LoginField::Email, localizer)?;
        form.set(LoginField::Email, email);
    }
    if form.value(LoginField::Password).is_empty() {
        let password = interactive::secret("Password", form, LoginField::Password, localizer)?;
        form.set(LoginField::Password, password);
    }
    Ok(())
}

#[cfg(not(feature = "interactive"))]
pub fn complete_login(_form: &mut LoginForm, _localizer: Localizer) -> CliResult<()> {
    Ok(())
}

/// `(wire value, label)` pairs for the closed-set fields.
#[cfg(feature = "interactive")]
fn choices(field: fitform_core::domain::RegistrationField) -> Option<Vec<(String, String)>> {
    use fitform_core::domain::{
        ActivityLevel, AggressivenessLevel, FitnessObjective, Gender, RegistrationField,
    };

    let options = match field {
        RegistrationField::Gender => Gender::ALL
            .iter()
            .map(|g| (g.as_str().to_string(), g.as_str().to_string()))
            .collect(),
        RegistrationField::ActivityLevel => ActivityLevel::ALL
            .iter()
            .map(|a| (a.to_string(), format!("{a}  {}", a.description())))
            .collect(),
        RegistrationField::Objective => FitnessObjective::ALL
            .iter()
            .map(|o| (o.as_str().to_string(), o.label_es().to_string()))
            .collect(),
        RegistrationField::AggressivenessLevel => AggressivenessLevel::ALL
            .iter()
            .map(|l| (l.to_string(), l.to_string()))
            .collect(),
        _ => return None,
    };
    Some(options)
}

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::theme::ColorfulTheme;
    use dialoguer::{Input, Password, Select};

    use fitform_core::domain::{Form, Localizer};

    use crate::error::CliResult;

    /// Validate `input` against `field` on a scratch copy of the form.
    fn probe<F>(form: &F, field: F::Field, input: &str, localizer: Localizer) -> Result<(), String>
    where
        F: Form + Clone,
    {
        let mut scratch = form.clone();
        scratch.set(field, input);
        match scratch.check(field).error() {
            Some(message) => Err(localizer.translate(message).into_owned()),
            None => Ok(()),
        }
    }

    pub fn text<F>(label: &str, form: &F, field: F::Field, localizer: Localizer) -> CliResult<String>
    where
        F: Form + Clone,
    {
        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .validate_with(|input: &String| probe(form, field, input, localizer))
            .interact_text()?;
        Ok(answer)
    }

    pub fn secret<F>(label: &str, form: &F, field: F::Field, localizer: Localizer) -> CliResult<String>
    where
        F: Form + Clone,
    {
        let answer = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .validate_with(|input: &String| probe(form, field, input, localizer))
            .interact()?;
        Ok(answer)
    }

    pub fn choose(label: &str, options: &[(String, String)]) -> CliResult<String> {
        let labels: Vec<&str> = options.iter().map(|(_, label)| label.as_str()).collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(labels.as_slice())
            .default(0)
            .interact()?;
        Ok(options[index].0.clone())
    }
}

#[cfg(all(test, feature = "interactive"))]
mod tests {
    use super::*;
    use fitform_core::domain::RegistrationField;

    #[test]
    fn no_input_disables_prompts() {
        assert!(!enabled(true));
    }

    #[test]
    fn closed_fields_offer_wire_values() {
        let levels = choices(RegistrationField::ActivityLevel).unwrap();
        let values: Vec<&str> = levels.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, ["1.20", "1.35", "1.50", "1.65", "1.80"]);

        let genders = choices(RegistrationField::Gender).unwrap();
        assert_eq!(genders[0].0, "male");
        assert!(choices(RegistrationField::Email).is_none());
    }
}
