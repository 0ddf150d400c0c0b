//! `fitform progress`: score the period and optionally chart it.

use serde_json::json;
use tracing::instrument;

use fitform_core::application::dto::{ProgressEvaluation, ProgressTimeline, TimelineSeries};
use fitform_core::domain::{SeriesSummary, sparkline};

use crate::{
    app::App,
    cli::ProgressArgs,
    commands::opt1,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(period = %args.period))]
pub async fn execute(args: ProgressArgs, app: &App, output: &OutputManager) -> CliResult<()> {
    let progress = app.progress();
    let evaluation = progress
        .evaluate(args.period)
        .await
        .map_err(|e| app.fail(e))?;
    let timeline = if args.timeline {
        progress.timeline(args.period).await
    } else {
        None
    };

    if output.is_json() {
        output.json(&json!({ "evaluation": evaluation, "timeline": timeline }))?;
        return Ok(());
    }

    print_evaluation(&evaluation, output)?;
    if args.timeline {
        match &timeline {
            Some(t) => print_timeline(t, output)?,
            None => output.warning("Timeline unavailable")?,
        }
    }
    Ok(())
}

fn print_evaluation(e: &ProgressEvaluation, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Progreso ({})", e.periodo))?;
    output.field("Score", format!("{:.0}/100", e.score))?;
    output.field("Estado", &e.estado)?;
    output.field("Δ peso (kg)", format!("{:+.1}", e.metricas.delta_weight))?;
    output.field("Δ grasa (%)", signed(e.metricas.delta_fat))?;
    output.field("Δ masa magra (kg)", signed(e.metricas.delta_lean))?;
    output.print(&format!("  {}", e.resumen))?;
    for warning in &e.advertencias {
        output.warning(warning)?;
    }
    Ok(())
}

fn print_timeline(t: &ProgressTimeline, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("{} → {}", t.rango_inicio, t.rango_fin))?;

    let s = &t.series;
    chart("Peso (kg)", &TimelineSeries::values(&s.peso), output)?;
    chart("Grasa (%)", &TimelineSeries::values(&s.porcentaje_grasa), output)?;
    chart(
        "Masa magra (%)",
        &TimelineSeries::values(&s.porcentaje_masa_magra),
        output,
    )?;
    let consumed: Vec<f64> = s.calorias_diarias.iter().map(|p| p.consumidas).collect();
    chart("Calorías/día", &consumed, output)?;

    output.field(
        "Semana (kcal)",
        format!(
            "{:.0} / {:.0}",
            t.resumen.calorias_semana_real, t.resumen.calorias_semana_meta
        ),
    )?;
    for warning in &t.advertencias {
        output.warning(warning)?;
    }
    Ok(())
}

/// `▂▄▆█  80.0 → 78.5 ↓`, or `-` for an empty series.
fn chart(label: &str, values: &[f64], output: &OutputManager) -> CliResult<()> {
    output.field(label, chart_line(values))?;
    Ok(())
}

fn chart_line(values: &[f64]) -> String {
    match SeriesSummary::from_values(values) {
        Some(summary) => format!(
            "{}  {:.1} → {:.1} {}",
            sparkline(values),
            summary.first,
            summary.last,
            summary.trend().arrow()
        ),
        None => "-".to_string(),
    }
}

fn signed(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1}"),
        None => opt1(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_line_shows_direction() {
        let line = chart_line(&[80.0, 79.0, 78.5]);
        assert!(line.ends_with("80.0 → 78.5 ↓"));
        assert_eq!(chart_line(&[]), "-");
    }

    #[test]
    fn deltas_are_signed() {
        assert_eq!(signed(Some(1.24)), "+1.2");
        assert_eq!(signed(Some(-0.5)), "-0.5");
        assert_eq!(signed(None), "-");
    }
}
