//! Progress evaluation and timelines computed from stored measurements.
//!
//! ## Evaluation
//!
//! Records are sorted, windowed to the period (or the whole history when the
//! window holds fewer than two), split into an initial and a final half, and
//! the half averages are compared. Deltas below the period's noise threshold
//! count as zero. Each objective scores the deltas its own way; the raw score
//! is scaled by the period multiplier and clamped to `[-100, 100]`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use fitform_core::application::dto::{
    CaloriePoint, LoggedMeal, MacroPoint, ProgressEvaluation, ProgressMetrics, ProgressTimeline,
    SeriesPoint, SkinfoldResult, TimelineSeries, TimelineTotals, UserProfile,
};
use fitform_core::domain::{FitnessObjective, ProgressPeriod};

use super::round1;

const MIN_HISTORY: usize = 2;
const SCORE_MIN: f64 = -100.0;
const SCORE_MAX: f64 = 100.0;
const POSITIVE_THRESHOLD: f64 = 10.0;
const STABLE_MIN: f64 = -10.0;
const MAINTENANCE_MAX_WEIGHT_PCT: f64 = 2.0;
const MAINTENANCE_MAX_FAT_POINTS: f64 = 1.0;
const MAINTENANCE_MAX_LEAN_POINTS: f64 = 1.0;
const ANNUAL_FAT_POINTS: f64 = 3.0;
const ANNUAL_LEAN_KG: f64 = 2.0;
const DEFAULT_CALORIE_TARGET: f64 = 2000.0;

pub const STATE_POSITIVE: &str = "Progreso positivo";
pub const STATE_STABLE: &str = "Estable";
pub const STATE_OFF_TRACK: &str = "Desviación del objetivo";

fn weight_noise_kg(period: ProgressPeriod) -> f64 {
    match period {
        ProgressPeriod::Week => 0.3,
        ProgressPeriod::Month => 0.5,
        ProgressPeriod::Year => 1.0,
    }
}

fn body_comp_noise_pct(period: ProgressPeriod) -> f64 {
    match period {
        ProgressPeriod::Week => 0.3,
        ProgressPeriod::Month => 0.5,
        ProgressPeriod::Year => 1.0,
    }
}

fn score_multiplier(period: ProgressPeriod) -> f64 {
    match period {
        ProgressPeriod::Week => 0.8,
        ProgressPeriod::Month => 1.0,
        ProgressPeriod::Year => 1.2,
    }
}

/// A stored calculation plus the body weight it was taken at.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub result: SkinfoldResult,
    pub weight_kg: Option<f64>,
}

/// Weight recorded from a profile update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEntry {
    pub at: DateTime<Utc>,
    pub weight_kg: f64,
}

/// One row of evaluation input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRecord {
    pub at: DateTime<Utc>,
    pub weight_kg: Option<f64>,
    pub fat_percent: Option<f64>,
    pub lean_percent: Option<f64>,
}

impl From<&Measurement> for HistoryRecord {
    fn from(m: &Measurement) -> Self {
        Self {
            at: m.result.measured_at,
            weight_kg: m.weight_kg,
            fat_percent: Some(m.result.estimate.body_fat_percent),
            lean_percent: Some(m.result.estimate.fat_free_mass_percent),
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

struct Averages {
    weight: f64,
    fat: Option<f64>,
    lean: Option<f64>,
}

/// Rows passed here always carry a weight.
struct Row {
    at: DateTime<Utc>,
    weight: f64,
    fat: Option<f64>,
    lean: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

impl Averages {
    fn of(rows: &[Row]) -> Self {
        Self {
            weight: mean(rows.iter().map(|r| r.weight)).unwrap_or(0.0),
            fat: mean(rows.iter().filter_map(|r| r.fat)),
            lean: mean(rows.iter().filter_map(|r| r.lean)),
        }
    }
}

fn noise_filter(value: f64, threshold: f64) -> f64 {
    if value.abs() < threshold { 0.0 } else { value }
}

fn classify(score: f64) -> &'static str {
    if score > POSITIVE_THRESHOLD {
        STATE_POSITIVE
    } else if score >= STABLE_MIN {
        STATE_STABLE
    } else {
        STATE_OFF_TRACK
    }
}

fn insufficient(period: ProgressPeriod, resumen: &str, warning: &str) -> ProgressEvaluation {
    ProgressEvaluation {
        periodo: period,
        score: 0.0,
        estado: STATE_STABLE.to_string(),
        resumen: resumen.to_string(),
        metricas: ProgressMetrics::default(),
        advertencias: vec![warning.to_string()],
    }
}

/// Window ending at the latest record; falls back to the full history.
fn window(rows: &[Row], period: ProgressPeriod) -> (&[Row], bool) {
    let Some(latest) = rows.last() else {
        return (rows, false);
    };
    let start = latest.at - Duration::days(period.days());
    let first_in = rows.iter().position(|r| r.at >= start).unwrap_or(rows.len());
    let in_window = &rows[first_in..];
    if in_window.len() >= MIN_HISTORY {
        (in_window, false)
    } else {
        (rows, true)
    }
}

fn split(rows: &[Row]) -> (&[Row], &[Row]) {
    let index = (rows.len() / 2).max(1);
    let (initial, last) = rows.split_at(index.min(rows.len()));
    if last.is_empty() {
        (initial, &rows[rows.len() - 1..])
    } else {
        (initial, last)
    }
}

fn kg(value: f64) -> String {
    format!("{:.1}", round1(value))
}

fn points(value: Option<f64>) -> String {
    value.map(kg).unwrap_or_else(|| "-".to_string())
}

/// Scores progress toward `objective` over `period`. `None` evaluates as
/// maintenance with a warning.
pub fn evaluate(
    objective: Option<FitnessObjective>,
    period: ProgressPeriod,
    history: &[HistoryRecord],
) -> ProgressEvaluation {
    if history.len() < MIN_HISTORY {
        return insufficient(
            period,
            "No hay suficientes registros para evaluar tendencia. Se requieren al menos 2 mediciones.",
            "Datos insuficientes para evaluar progreso.",
        );
    }

    let mut warnings = Vec::new();
    let objective = objective.unwrap_or_else(|| {
        warnings.push("Objetivo no reconocido. Se evaluó con criterios de mantenimiento.".to_string());
        FitnessObjective::Maintenance
    });

    let mut rows: Vec<Row> = history
        .iter()
        .filter_map(|h| {
            h.weight_kg.map(|weight| Row {
                at: h.at,
                weight,
                fat: h.fat_percent,
                lean: h.lean_percent,
            })
        })
        .collect();
    if rows.len() < MIN_HISTORY {
        return insufficient(
            period,
            "No hay suficientes registros válidos para evaluar tendencia.",
            "Datos insuficientes o fechas inválidas en el historial.",
        );
    }
    rows.sort_by_key(|r| r.at);

    let (scoped, fell_back) = window(&rows, period);
    if fell_back {
        warnings.push(
            "No hay suficientes datos en el periodo solicitado; se usó el rango disponible más cercano."
                .to_string(),
        );
    }

    let (initial, last) = split(scoped);
    let first = Averages::of(initial);
    let latest = Averages::of(last);

    let weight_noise = weight_noise_kg(period);
    let comp_noise = body_comp_noise_pct(period);

    let weight_base = latest.weight - first.weight;
    let fat_base = first.fat.zip(latest.fat).map(|(a, b)| b - a);
    let lean_base = first.lean.zip(latest.lean).map(|(a, b)| b - a);

    let d_weight = noise_filter(weight_base, weight_noise);
    let d_fat = fat_base.map(|v| noise_filter(v, comp_noise));
    let d_lean = lean_base.map(|v| noise_filter(v, comp_noise));

    let (raw, mut resumen) = match objective {
        FitnessObjective::FatLoss => match d_fat {
            Some(fat) => {
                let mut raw = -fat * 60.0 - d_weight * 10.0;
                match d_lean {
                    Some(lean) => raw += lean * 30.0,
                    None => warnings.push(
                        "No hay porcentaje de masa magra para verificar preservación muscular."
                            .to_string(),
                    ),
                }
                (
                    raw,
                    format!(
                        "En el periodo analizado, el peso cambió {} kg y la grasa corporal {} puntos.",
                        kg(weight_base),
                        points(fat_base)
                    ),
                )
            }
            None => {
                warnings.push(
                    "No hay datos de composición corporal (grasa/magra). El análisis se basa solo en peso."
                        .to_string(),
                );
                (
                    -d_weight * 100.0,
                    format!(
                        "Se observa una variación de peso de {} kg en el periodo. Sin datos de grasa corporal, no puede confirmarse la calidad del cambio.",
                        kg(weight_base)
                    ),
                )
            }
        },

        FitnessObjective::Maintenance => {
            let pct = if first.weight == 0.0 {
                0.0
            } else {
                (latest.weight - first.weight) / first.weight * 100.0
            };
            let pct = noise_filter(pct, weight_noise);

            let mut penalty = 0.0;
            if pct.abs() > MAINTENANCE_MAX_WEIGHT_PCT {
                penalty += (pct.abs() - MAINTENANCE_MAX_WEIGHT_PCT) * 20.0;
            }
            match d_fat {
                Some(fat) if fat.abs() > MAINTENANCE_MAX_FAT_POINTS => {
                    penalty += (fat.abs() - MAINTENANCE_MAX_FAT_POINTS) * 30.0;
                }
                Some(_) => {}
                None => warnings.push(
                    "No hay % de grasa para una evaluación completa de mantenimiento.".to_string(),
                ),
            }
            if let Some(lean) = d_lean.filter(|l| l.abs() > MAINTENANCE_MAX_LEAN_POINTS) {
                penalty += (lean.abs() - MAINTENANCE_MAX_LEAN_POINTS) * 20.0;
            }
            (
                30.0 - penalty,
                format!(
                    "En mantenimiento, el peso cambió {} kg ({:.1}%).",
                    kg(weight_base),
                    round1(pct)
                ),
            )
        }

        FitnessObjective::MuscleGain => match d_lean {
            Some(lean) => {
                let mut raw = lean * 60.0 + d_weight * 20.0;
                match d_fat {
                    Some(fat) => raw -= fat * 20.0,
                    None => warnings.push(
                        "No hay % de grasa para controlar ganancia de grasa no deseada.".to_string(),
                    ),
                }
                (
                    raw,
                    format!(
                        "La masa magra cambió {} puntos y el peso {} kg en el periodo, consistente con objetivo de aumento muscular.",
                        points(lean_base),
                        kg(weight_base)
                    ),
                )
            }
            None => {
                warnings.push(
                    "No hay % de masa magra. El análisis se basa solo en variación de peso."
                        .to_string(),
                );
                (
                    d_weight * 100.0,
                    format!(
                        "El peso cambió {} kg. Faltan datos de masa magra para confirmar progreso de hipertrofia.",
                        kg(weight_base)
                    ),
                )
            }
        },

        FitnessObjective::BodyRecomp => match d_fat.zip(d_lean) {
            Some((fat, lean)) => (
                -fat * 50.0 + lean * 50.0,
                format!(
                    "En el periodo, la grasa cambió {} puntos y la masa magra {} puntos, acorde a recomposición corporal.",
                    points(fat_base),
                    points(lean_base)
                ),
            ),
            None => {
                warnings.push(
                    "La recomposición requiere % de grasa y % de masa magra en el historial."
                        .to_string(),
                );
                (
                    0.0,
                    "Datos insuficientes para evaluar recomposición corporal. Se necesitan mediciones de grasa y masa magra en al menos 2 registros."
                        .to_string(),
                )
            }
        },

        FitnessObjective::Performance => {
            let scored = match d_fat.zip(d_lean) {
                Some((fat, lean)) => (
                    -d_weight.abs() * 10.0 - fat * 35.0 + lean * 35.0,
                    format!(
                        "La evaluación de rendimiento se apoya en estabilidad/composición corporal (peso {} kg, grasa {} pts, magra {} pts).",
                        kg(weight_base),
                        points(fat_base),
                        points(lean_base)
                    ),
                ),
                None => {
                    warnings.push(
                        "Sin datos completos de composición corporal, la evaluación de rendimiento es parcial."
                            .to_string(),
                    );
                    (
                        -d_weight.abs() * 20.0,
                        format!(
                            "El peso cambió {} kg. Para evaluar rendimiento con mayor precisión, añade métricas deportivas (carga, tiempos, repeticiones).",
                            kg(weight_base)
                        ),
                    )
                }
            };
            warnings.push(
                "Sugerencia: incorporar métricas deportivas para una evaluación de rendimiento más robusta."
                    .to_string(),
            );
            scored
        }
    };

    let score = round1((raw * score_multiplier(period)).clamp(SCORE_MIN, SCORE_MAX));

    resumen.push_str(match period {
        ProgressPeriod::Week => {
            " Variación semanal observada. Recuerda que los cambios a corto plazo pueden reflejar ajustes de líquidos y glucógeno."
        }
        ProgressPeriod::Month => " La tendencia mensual es consistente con tu objetivo.",
        ProgressPeriod::Year => {
            let lean_kg = first
                .lean
                .zip(latest.lean)
                .map(|(a, b)| latest.weight * b / 100.0 - first.weight * a / 100.0);
            let significant = fat_base.is_some_and(|d| d.abs() >= ANNUAL_FAT_POINTS)
                || lean_kg.is_some_and(|d| d.abs() >= ANNUAL_LEAN_KG);
            if significant {
                " Transformación anual significativa detectada."
            } else {
                " Evaluación anual completada con enfoque estructural de largo plazo."
            }
        }
    });

    ProgressEvaluation {
        periodo: period,
        score,
        estado: classify(score).to_string(),
        resumen,
        metricas: ProgressMetrics {
            delta_weight: round1(d_weight),
            delta_fat: d_fat.map(round1),
            delta_lean: d_lean.map(round1),
        },
        advertencias: warnings,
    }
}

// ============================================================================
// Timeline
// ============================================================================

/// Everything the timeline reads for one user.
#[derive(Debug, Clone, Copy)]
pub struct TimelineSource<'a> {
    pub profile: &'a UserProfile,
    pub measurements: &'a [Measurement],
    pub weights: &'a [WeightEntry],
    pub meals: &'a [LoggedMeal],
}

#[derive(Debug, Default, Clone, Copy)]
struct DayTotals {
    calories: f64,
    carbs: f64,
    protein: f64,
    fat: f64,
}

fn percent_of(consumed: f64, target: Option<f64>) -> f64 {
    match target {
        Some(t) if t > 0.0 => round1(consumed / t * 100.0),
        _ => 0.0,
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Daily series for the `period` days ending today, in UTC.
pub fn timeline(
    source: &TimelineSource<'_>,
    period: ProgressPeriod,
    now: DateTime<Utc>,
) -> ProgressTimeline {
    let mut warnings = Vec::new();
    let today = now.date_naive();
    let start_day = today - Duration::days(period.days() - 1);
    let start = midnight(start_day);
    let end = midnight(today + Duration::days(1));
    let in_range = |at: DateTime<Utc>| at >= start && at < end;

    let mut series = TimelineSeries::default();

    let mut weights: Vec<(DateTime<Utc>, f64)> = source
        .weights
        .iter()
        .filter(|w| in_range(w.at))
        .map(|w| (w.at, w.weight_kg))
        .collect();

    let mut measurements: Vec<&Measurement> = source
        .measurements
        .iter()
        .filter(|m| in_range(m.result.measured_at))
        .collect();
    measurements.sort_by_key(|m| m.result.measured_at);

    for m in &measurements {
        let fecha = m.result.measured_at.fixed_offset();
        if let Some(weight) = m.weight_kg {
            weights.push((m.result.measured_at, weight));
        }
        series.porcentaje_grasa.push(SeriesPoint {
            fecha,
            valor: round1(m.result.estimate.body_fat_percent),
        });
        series.porcentaje_masa_magra.push(SeriesPoint {
            fecha,
            valor: round1(m.result.estimate.fat_free_mass_percent),
        });
    }

    weights.sort_by_key(|(at, _)| *at);
    series.peso = weights
        .into_iter()
        .map(|(at, kg)| SeriesPoint {
            fecha: at.fixed_offset(),
            valor: round1(kg),
        })
        .collect();

    if series.peso.is_empty() {
        if let Some(weight) = source.profile.weight {
            warnings.push(
                "No hay histórico de peso en el periodo. Se muestra el peso actual como referencia."
                    .to_string(),
            );
            series.peso.push(SeriesPoint {
                fecha: now.fixed_offset(),
                valor: round1(weight),
            });
        }
    }
    if series.porcentaje_grasa.is_empty() {
        warnings.push("No hay mediciones de % grasa en el periodo seleccionado.".to_string());
    }
    if series.porcentaje_masa_magra.is_empty() {
        warnings.push("No hay mediciones de % masa magra en el periodo seleccionado.".to_string());
    }

    let profile = source.profile;
    let target = profile
        .target_calories
        .filter(|t| *t > 0.0)
        .or(profile.daily_caloric_expenditure)
        .unwrap_or(DEFAULT_CALORIE_TARGET);

    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for meal in source.meals.iter().filter(|m| in_range(m.event_timestamp)) {
        let day = days.entry(meal.event_timestamp.date_naive()).or_default();
        day.calories += meal.total_calories;
        day.carbs += meal.total_carbs;
        day.protein += meal.total_protein;
        day.fat += meal.total_fat;
    }

    for (day, totals) in &days {
        let fecha = midnight(*day).fixed_offset();
        series.calorias_diarias.push(CaloriePoint {
            fecha,
            consumidas: round1(totals.calories),
            meta: round1(target),
        });
        series.macros_porcentaje.push(MacroPoint {
            fecha,
            carbs: percent_of(totals.carbs, profile.carbs_target_g),
            protein: percent_of(totals.protein, profile.protein_target_g),
            fat: percent_of(totals.fat, profile.fat_target_g),
        });
    }
    if series.calorias_diarias.is_empty() {
        warnings.push(
            "No hay consumo calórico diario registrado en el periodo seleccionado.".to_string(),
        );
    }

    let week_start = today - Duration::days(6);
    let week_real: f64 = days
        .range(week_start..=today)
        .map(|(_, totals)| totals.calories)
        .sum();

    ProgressTimeline {
        periodo: period,
        rango_inicio: start_day,
        rango_fin: today,
        series,
        resumen: TimelineTotals {
            calorias_semana_real: round1(week_real),
            calorias_semana_meta: round1(target * 7.0),
        },
        advertencias: warnings,
    }
}
