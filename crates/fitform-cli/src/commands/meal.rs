//! `fitform meal parse`.

use serde_json::json;
use tracing::instrument;

use fitform_core::application::dto::MealEstimate;

use crate::{
    app::App,
    cli::{MealCommands, MealParseArgs},
    error::CliResult,
    output::OutputManager,
};

pub async fn execute(cmd: MealCommands, app: &App, output: &OutputManager) -> CliResult<()> {
    match cmd {
        MealCommands::Parse(args) => parse(args, app, output).await,
    }
}

#[instrument(skip_all, fields(log = args.log))]
async fn parse(args: MealParseArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let meals = app.meals();

    if !args.log {
        let estimate = meals.parse(&args.text).await.map_err(|e| app.fail(e))?;
        if output.is_json() {
            output.json(&estimate)?;
            return Ok(());
        }
        return print_estimate(&estimate, output);
    }

    let (estimate, logged) = meals
        .parse_and_log(&args.text)
        .await
        .map_err(|e| app.fail(e))?;
    if output.is_json() {
        output.json(&json!({ "estimate": estimate, "logged": logged }))?;
        return Ok(());
    }
    print_estimate(&estimate, output)?;
    output.notifications(&app.ctx().drain_notifications())?;
    output.field("Logged at", logged.event_timestamp.format("%Y-%m-%d %H:%M"))?;
    Ok(())
}

fn print_estimate(estimate: &MealEstimate, output: &OutputManager) -> CliResult<()> {
    output.header(&format!(
        "{} ({:.0} g)",
        estimate.food, estimate.quantity_grams
    ))?;
    output.field("Calories", format!("{:.0} kcal", estimate.total_calories))?;
    output.field("Protein", format!("{:.1} g", estimate.total_protein))?;
    output.field("Fat", format!("{:.1} g", estimate.total_fat))?;
    output.field("Carbs", format!("{:.1} g", estimate.total_carbs))?;
    output.field(
        "Per 100 g",
        format!(
            "{:.0} kcal, P {:.1} / F {:.1} / C {:.1}",
            estimate.calories_per_100g,
            estimate.protein_per_100g,
            estimate.fat_per_100g,
            estimate.carbs_per_100g,
        ),
    )?;
    Ok(())
}
