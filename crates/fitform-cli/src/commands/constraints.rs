//! `fitform constraints`: print the shared validation bounds.

use fitform_core::domain::Constraints;

use crate::{error::CliResult, output::OutputManager};

pub fn execute(output: &OutputManager) -> CliResult<()> {
    let c = Constraints::STANDARD;

    if output.is_json() {
        output.json(&c.schema())?;
        return Ok(());
    }

    let levels: Vec<String> = c.activity_levels().iter().map(|l| l.to_string()).collect();
    let objectives: Vec<&str> = c.objectives().iter().map(|o| o.as_str()).collect();
    let aggressiveness: Vec<String> = c
        .aggressiveness_levels()
        .iter()
        .map(|a| a.to_string())
        .collect();

    output.header("Account")?;
    output.field("email", format!("≤ {} chars", c.max_email_length))?;
    output.field(
        "password",
        format!(
            "≥ {} chars, first {} bytes used",
            c.min_password_length, c.password_byte_limit
        ),
    )?;
    output.field("first/last name", format!("≤ {} chars", c.max_name_length))?;

    output.header("Biometrics")?;
    output.field("age", format!("{}-{} years", c.min_age, c.max_age))?;
    output.field(
        "weight",
        format!("{}-{} kg", c.min_weight_kg, c.max_weight_kg),
    )?;
    output.field(
        "height",
        format!("{}-{} cm", c.min_height_cm, c.max_height_cm),
    )?;
    output.field("activity_level", levels.join(", "))?;
    output.field("objective", objectives.join(", "))?;
    output.field("aggressiveness_level", aggressiveness.join(", "))?;

    output.header("Skinfolds")?;
    output.field(
        "reading",
        format!("{}-{} mm", c.min_skinfold_mm, c.max_skinfold_mm),
    )?;
    output.field("flagged above", format!("{} mm", c.skinfold_warning_mm))?;
    output.field("readings per site", c.max_skinfold_readings)?;
    output.field(
        "recommended ages",
        format!(
            "{}-{}",
            c.skinfold_recommended_min_age, c.skinfold_recommended_max_age
        ),
    )?;

    output.header("Meals")?;
    output.field(
        "description",
        format!("{}-{} chars", c.min_meal_text, c.max_meal_text),
    )?;

    Ok(())
}
