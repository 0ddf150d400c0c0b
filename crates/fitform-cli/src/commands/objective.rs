//! `fitform objective`.

use tracing::instrument;

use fitform_core::domain::{Form, ObjectiveField, ObjectiveForm};

use crate::{
    app::App,
    cli::ObjectiveArgs,
    commands::profile::print_profile,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(objective = %args.objective))]
pub async fn execute(args: ObjectiveArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut form = ObjectiveForm::new();
    form.set(ObjectiveField::Objective, args.objective.as_str());
    if let Some(level) = &args.level {
        form.set(ObjectiveField::AggressivenessLevel, level.as_str());
    }

    let user = app
        .profile()
        .update_objective(&mut form)
        .await
        .map_err(|e| app.fail(e))?;

    if output.is_json() {
        output.json(&user)?;
        return Ok(());
    }
    output.notifications(&app.ctx().drain_notifications())?;
    print_profile(&user, output)
}
