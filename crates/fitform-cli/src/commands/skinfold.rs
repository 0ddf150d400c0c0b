//! `fitform skinfold calc|parse|history`.

use tracing::instrument;

use fitform_core::application::dto::SkinfoldResult;
use fitform_core::domain::{Form, SkinfoldField, SkinfoldForm, SkinfoldSite, SkinfoldValues};

use crate::{
    app::App,
    cli::{SkinfoldCalcArgs, SkinfoldCommands, SkinfoldParseArgs, SubjectArgs},
    commands::opt1,
    error::CliResult,
    output::OutputManager,
};

pub async fn execute(cmd: SkinfoldCommands, app: &App, output: &OutputManager) -> CliResult<()> {
    match cmd {
        SkinfoldCommands::Calc(args) => calc(args, app, output).await,
        SkinfoldCommands::Parse(args) => parse(args, app, output).await,
        SkinfoldCommands::History => history(app, output).await,
    }
}

#[instrument(skip_all)]
async fn calc(args: SkinfoldCalcArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut form = SkinfoldForm::new();
    apply_subject(&mut form, &args.subject);
    for (site, raw) in args.sites.entries() {
        form.set_readings(site, split_readings(raw));
    }

    let result = app
        .skinfolds()
        .calculate(&mut form)
        .await
        .map_err(|e| app.fail(e))?;
    print_result(&result, app, output)
}

#[instrument(skip_all)]
async fn parse(args: SkinfoldParseArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let mut form = SkinfoldForm::new();
    let parsed = app
        .skinfolds()
        .parse_text(&args.text, &mut form)
        .await
        .map_err(|e| app.fail(e))?;

    if !args.calculate {
        if output.is_json() {
            output.json(&parsed)?;
            return Ok(());
        }
        output.notifications(&app.ctx().drain_notifications())?;
        print_sites(&parsed.parsed, output)?;
        if let Some(gate) = form.gate_message() {
            output.info(&gate)?;
        }
        return Ok(());
    }

    if !output.is_json() {
        output.notifications(&app.ctx().drain_notifications())?;
        print_sites(&parsed.parsed, output)?;
    }
    apply_subject(&mut form, &args.subject);
    let result = app
        .skinfolds()
        .calculate(&mut form)
        .await
        .map_err(|e| app.fail(e))?;
    print_result(&result, app, output)
}

#[instrument(skip_all)]
async fn history(app: &App, output: &OutputManager) -> CliResult<()> {
    // An unreadable history is shown as empty; a missing session is not.
    app.ctx().token().map_err(|e| app.fail(e))?;
    let items = app.skinfolds().history().await;

    if output.is_json() {
        output.json(&items)?;
        return Ok(());
    }
    if items.is_empty() {
        output.info("No measurements yet")?;
        return Ok(());
    }

    output.header(&format!(
        "{:<12} {:>8} {:>9} {:>9}  {}",
        "Date", "Sum mm", "Fat %", "Lean kg", "Method"
    ))?;
    for item in &items {
        let e = &item.estimate;
        output.print(&format!(
            "{:<12} {:>8.1} {:>9.1} {:>9}  {}",
            item.measured_at.format("%Y-%m-%d"),
            e.sum_of_skinfolds_mm,
            e.body_fat_percent,
            opt1(e.lean_mass_kg),
            e.method,
        ))?;
    }
    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn apply_subject(form: &mut SkinfoldForm, subject: &SubjectArgs) {
    let given = [
        (SkinfoldField::Sex, &subject.sex),
        (SkinfoldField::Age, &subject.age),
        (SkinfoldField::Weight, &subject.weight),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            form.set(field, value.as_str());
        }
    }
}

/// `"10/11/ 12"` → `["10", "11", "12"]`.
fn split_readings(raw: &str) -> Vec<&str> {
    raw.split('/').map(str::trim).collect()
}

fn print_sites(values: &SkinfoldValues, output: &OutputManager) -> CliResult<()> {
    output.header("Pliegues (mm)")?;
    for &site in SkinfoldSite::ALL {
        output.field(site.label_es(), opt1(values.get(site)))?;
    }
    Ok(())
}

fn print_result(result: &SkinfoldResult, app: &App, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(result)?;
        return Ok(());
    }
    output.notifications(&app.ctx().drain_notifications())?;

    let e = &result.estimate;
    output.header(&e.method)?;
    output.field("Sum of skinfolds", format!("{:.1} mm", e.sum_of_skinfolds_mm))?;
    output.field("Body density", format!("{:.4}", e.body_density))?;
    output.field("Body fat", format!("{:.1} %", e.body_fat_percent))?;
    output.field("Fat-free mass", format!("{:.1} %", e.fat_free_mass_percent))?;
    output.field("Fat mass (kg)", opt1(e.fat_mass_kg))?;
    output.field("Lean mass (kg)", opt1(e.lean_mass_kg))?;
    for warning in &e.warnings {
        output.warning(warning)?;
    }
    Ok(())
}
