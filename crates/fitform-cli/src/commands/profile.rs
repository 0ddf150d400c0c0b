//! `fitform profile show` and `fitform profile update`.

use tracing::instrument;

use fitform_core::application::dto::UserProfile;
use fitform_core::domain::{Form, ProfileField, ProfileForm};

use crate::{
    app::App,
    cli::{ProfileCommands, ProfileUpdateArgs},
    commands::{opt0, opt1},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(cmd: ProfileCommands, app: &App, output: &OutputManager) -> CliResult<()> {
    let user = match cmd {
        ProfileCommands::Show => app.profile().current().await,
        ProfileCommands::Update(args) => {
            let mut form = form_from(&args);
            app.profile().update_biometrics(&mut form).await
        }
    }
    .map_err(|e| app.fail(e))?;

    if output.is_json() {
        output.json(&user)?;
        return Ok(());
    }
    output.notifications(&app.ctx().drain_notifications())?;
    print_profile(&user, output)
}

fn form_from(args: &ProfileUpdateArgs) -> ProfileForm {
    use ProfileField as F;
    let mut form = ProfileForm::new();
    let given = [
        (F::FirstName, &args.first_name),
        (F::LastName, &args.last_name),
        (F::Age, &args.age),
        (F::Gender, &args.gender),
        (F::Weight, &args.weight),
        (F::Height, &args.height),
        (F::ActivityLevel, &args.activity_level),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            form.set(field, value.as_str());
        }
    }
    form
}

/// Identity, biometrics and the derived energy targets.
pub(crate) fn print_profile(user: &UserProfile, output: &OutputManager) -> CliResult<()> {
    output.header(&user.full_name())?;
    output.field("Email", &user.email)?;
    output.field("Age", user.age.map_or_else(|| "-".into(), |a| a.to_string()))?;
    output.field(
        "Gender",
        user.gender.map_or_else(|| "-".into(), |g| g.to_string()),
    )?;
    output.field("Weight (kg)", opt1(user.weight))?;
    output.field("Height (cm)", opt1(user.height))?;
    output.field(
        "Activity level",
        user.activity_level
            .map_or_else(|| "-".into(), |a| format!("{a}  {}", a.description())),
    )?;
    output.field(
        "Objective",
        match (user.objective, user.aggressiveness_level) {
            (Some(o), Some(l)) => format!("{} (level {l})", o.label_es()),
            (Some(o), None) => o.label_es().to_string(),
            _ => "-".into(),
        },
    )?;

    output.header("Energy")?;
    output.field("BMR", opt0(user.bmr, "kcal"))?;
    output.field("Daily expenditure", opt0(user.daily_caloric_expenditure, "kcal"))?;
    output.field("Target", opt0(user.target_calories, "kcal"))?;
    output.field(
        "Macros (P/F/C)",
        format!(
            "{} / {} / {}",
            opt0(user.protein_target_g, "g"),
            opt0(user.fat_target_g, "g"),
            opt0(user.carbs_target_g, "g"),
        ),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_update_has_no_changes() {
        let mut form = form_from(&ProfileUpdateArgs::default());
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.first(), Some("Nothing to update"));
    }

    #[test]
    fn given_fields_reach_the_update() {
        let args = ProfileUpdateArgs {
            weight: Some("78.5".into()),
            ..Default::default()
        };
        let update = form_from(&args).submit().unwrap();
        assert_eq!(update.weight, Some(78.5));
        assert!(update.age.is_none());
    }
}
