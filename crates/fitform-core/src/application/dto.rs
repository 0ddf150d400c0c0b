//! Request and response bodies exchanged with the backend.
//!
//! Field names follow the backend's JSON contract, including the Spanish
//! keys of the progress endpoints.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ActivityLevel, AggressivenessLevel, BodyFatEstimate, FitnessObjective, Gender,
    ProgressPeriod, SkinfoldValues,
};

// ── Auth ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

impl AuthToken {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: bearer(),
        }
    }
}

/// `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,

    #[serde(default)]
    pub bmr: Option<f64>,
    #[serde(default)]
    pub daily_caloric_expenditure: Option<f64>,

    #[serde(default)]
    pub objective: Option<FitnessObjective>,
    #[serde(default)]
    pub aggressiveness_level: Option<AggressivenessLevel>,
    #[serde(default)]
    pub target_calories: Option<f64>,
    #[serde(default)]
    pub protein_target_g: Option<f64>,
    #[serde(default)]
    pub fat_target_g: Option<f64>,
    #[serde(default)]
    pub carbs_target_g: Option<f64>,
}

fn active() -> bool {
    true
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ── Skinfolds ────────────────────────────────────────────────────────────────

/// Calculation result, as returned by the calculator and the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinfoldResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub measured_at: DateTime<Utc>,
    #[serde(flatten)]
    pub estimate: BodyFatEstimate,
}

/// Free-text parse of caliper readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinfoldParse {
    pub parsed: SkinfoldValues,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

// ── Meals ────────────────────────────────────────────────────────────────────

/// `POST /food/parse-and-calculate` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEstimate {
    pub food: String,
    pub quantity_grams: f64,
    pub calories_per_100g: f64,
    pub carbs_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
    pub total_calories: f64,
    pub total_carbs: f64,
    pub total_protein: f64,
    pub total_fat: f64,
}

/// `POST /nutrition/meals` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub food_name: String,
    pub quantity_grams: f64,
    pub calories_per_100g: f64,
    pub carbs_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
}

impl From<&MealEstimate> for MealEntry {
    fn from(estimate: &MealEstimate) -> Self {
        Self {
            food_name: estimate.food.clone(),
            quantity_grams: estimate.quantity_grams,
            calories_per_100g: estimate.calories_per_100g,
            carbs_per_100g: estimate.carbs_per_100g,
            protein_per_100g: estimate.protein_per_100g,
            fat_per_100g: estimate.fat_per_100g,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    pub id: i64,
    #[serde(flatten)]
    pub entry: MealEntry,
    pub total_calories: f64,
    pub total_carbs: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub event_timestamp: DateTime<Utc>,
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRequest {
    pub periodo: ProgressPeriod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetrics {
    #[serde(rename = "deltaPeso", default)]
    pub delta_weight: f64,
    #[serde(rename = "deltaGrasa", default)]
    pub delta_fat: Option<f64>,
    #[serde(rename = "deltaMagra", default)]
    pub delta_lean: Option<f64>,
}

/// `POST /users/me/progress/evaluate` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvaluation {
    pub periodo: ProgressPeriod,
    pub score: f64,
    pub estado: String,
    pub resumen: String,
    pub metricas: ProgressMetrics,
    #[serde(default)]
    pub advertencias: Vec<String>,
}

/// Timeline points carry the backend's local time with its offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub fecha: DateTime<FixedOffset>,
    pub valor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaloriePoint {
    pub fecha: DateTime<FixedOffset>,
    pub consumidas: f64,
    pub meta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroPoint {
    pub fecha: DateTime<FixedOffset>,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineSeries {
    #[serde(default)]
    pub peso: Vec<SeriesPoint>,
    #[serde(default)]
    pub porcentaje_grasa: Vec<SeriesPoint>,
    #[serde(default)]
    pub porcentaje_masa_magra: Vec<SeriesPoint>,
    #[serde(default)]
    pub calorias_diarias: Vec<CaloriePoint>,
    #[serde(default)]
    pub macros_porcentaje: Vec<MacroPoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineTotals {
    #[serde(default)]
    pub calorias_semana_real: f64,
    #[serde(default)]
    pub calorias_semana_meta: f64,
}

/// `GET /users/me/progress/timeline` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressTimeline {
    pub periodo: ProgressPeriod,
    pub rango_inicio: NaiveDate,
    pub rango_fin: NaiveDate,
    #[serde(default)]
    pub series: TimelineSeries,
    #[serde(default)]
    pub resumen: TimelineTotals,
    #[serde(default)]
    pub advertencias: Vec<String>,
}

impl TimelineSeries {
    pub fn values(points: &[SeriesPoint]) -> Vec<f64> {
        points.iter().map(|p| p.valor).collect()
    }
}
