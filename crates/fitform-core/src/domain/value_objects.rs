//! Domain value objects: Gender, ActivityLevel, FitnessObjective,
//! AggressivenessLevel, SkinfoldSite, ProgressPeriod.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Each one owns its wire representation (`as_str` / serde) and a `FromStr`
//! parser. Bounds and limits live in `constraints.rs`; user-facing checks
//! with messages live in `validation.rs`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Gender ───────────────────────────────────────────────────────────────────

/// Biological sex used by the BMR and skinfold equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: &'static [Self] = &[Self::Male, Self::Female];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(DomainError::UnknownValue {
                field: "gender",
                value: other.to_string(),
            }),
        }
    }
}

// ── ActivityLevel ────────────────────────────────────────────────────────────

/// Daily activity multiplier applied to BMR.
///
/// Only five discrete values are accepted. On the wire this is the bare
/// multiplier (`1.5`), not a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: &'static [Self] = &[
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::Active,
        Self::VeryActive,
    ];

    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.20,
            Self::LightlyActive => 1.35,
            Self::ModeratelyActive => 1.50,
            Self::Active => 1.65,
            Self::VeryActive => 1.80,
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentario real - Trabajo de escritorio, sin ejercicio",
            Self::LightlyActive => "Ligeramente activo - Ejercicio ligero 1-3 días/semana",
            Self::ModeratelyActive => "Moderadamente activo - Ejercicio moderado 3-5 días/semana",
            Self::Active => "Activo - Ejercicio intenso 6-7 días/semana",
            Self::VeryActive => "Muy activo - Ejercicio muy intenso, trabajo físico",
        }
    }

    /// Match a parsed multiplier against the allowed set.
    ///
    /// Exact equality with one of the literals: `"1.5"` and `"1.50"` parse to
    /// the same `f64` and match, `1.5000000000001` does not.
    pub fn from_multiplier(value: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.multiplier() == value)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.multiplier())
    }
}

impl From<ActivityLevel> for f64 {
    fn from(level: ActivityLevel) -> Self {
        level.multiplier()
    }
}

impl TryFrom<f64> for ActivityLevel {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_multiplier(value).ok_or_else(|| DomainError::UnknownValue {
            field: "activity_level",
            value: value.to_string(),
        })
    }
}

impl FromStr for ActivityLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| DomainError::NotANumber {
            field: "activity_level",
            value: s.to_string(),
        })?;
        Self::try_from(value)
    }
}

// ── FitnessObjective ─────────────────────────────────────────────────────────

/// What the user is training for. Drives calorie and macro targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessObjective {
    Maintenance,
    FatLoss,
    MuscleGain,
    BodyRecomp,
    Performance,
}

impl FitnessObjective {
    pub const ALL: &'static [Self] = &[
        Self::Maintenance,
        Self::FatLoss,
        Self::MuscleGain,
        Self::BodyRecomp,
        Self::Performance,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::FatLoss => "fat_loss",
            Self::MuscleGain => "muscle_gain",
            Self::BodyRecomp => "body_recomp",
            Self::Performance => "performance",
        }
    }

    pub const fn label_es(&self) -> &'static str {
        match self {
            Self::Maintenance => "Mantenimiento",
            Self::FatLoss => "Pérdida de grasa",
            Self::MuscleGain => "Ganancia muscular",
            Self::BodyRecomp => "Recomposición corporal",
            Self::Performance => "Rendimiento",
        }
    }
}

impl fmt::Display for FitnessObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessObjective {
    type Err = DomainError;

    /// Exact wire names only; the backend rejects anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| DomainError::UnknownValue {
                field: "objective",
                value: s.to_string(),
            })
    }
}

// ── AggressivenessLevel ──────────────────────────────────────────────────────

/// How hard an objective is pursued (1 = conservative, 3 = aggressive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum AggressivenessLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl AggressivenessLevel {
    pub const ALL: &'static [Self] = &[Self::Conservative, Self::Moderate, Self::Aggressive];

    pub const fn value(&self) -> u8 {
        match self {
            Self::Conservative => 1,
            Self::Moderate => 2,
            Self::Aggressive => 3,
        }
    }
}

impl Default for AggressivenessLevel {
    fn default() -> Self {
        Self::Moderate
    }
}

impl fmt::Display for AggressivenessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<AggressivenessLevel> for u8 {
    fn from(level: AggressivenessLevel) -> Self {
        level.value()
    }
}

impl TryFrom<i64> for AggressivenessLevel {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Conservative),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Aggressive),
            other => Err(DomainError::UnknownValue {
                field: "aggressiveness_level",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for AggressivenessLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| DomainError::NotANumber {
            field: "aggressiveness_level",
            value: s.to_string(),
        })?;
        Self::try_from(value)
    }
}

// ── SkinfoldSite ─────────────────────────────────────────────────────────────

/// One of the seven Jackson-Pollock caliper sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinfoldSite {
    Chest,
    Midaxillary,
    Triceps,
    Subscapular,
    Abdomen,
    Suprailiac,
    Thigh,
}

impl SkinfoldSite {
    /// All seven sites, in the order the form displays them.
    pub const ALL: &'static [Self] = &[
        Self::Chest,
        Self::Midaxillary,
        Self::Triceps,
        Self::Subscapular,
        Self::Abdomen,
        Self::Suprailiac,
        Self::Thigh,
    ];

    /// Sites used by the three-site fallback equation.
    pub const JP3: &'static [Self] = &[Self::Chest, Self::Abdomen, Self::Thigh];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Midaxillary => "midaxillary",
            Self::Triceps => "triceps",
            Self::Subscapular => "subscapular",
            Self::Abdomen => "abdomen",
            Self::Suprailiac => "suprailiac",
            Self::Thigh => "thigh",
        }
    }

    /// JSON key in calculation payloads.
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Chest => "chest_mm",
            Self::Midaxillary => "midaxillary_mm",
            Self::Triceps => "triceps_mm",
            Self::Subscapular => "subscapular_mm",
            Self::Abdomen => "abdomen_mm",
            Self::Suprailiac => "suprailiac_mm",
            Self::Thigh => "thigh_mm",
        }
    }

    pub const fn label_es(&self) -> &'static str {
        match self {
            Self::Chest => "pecho",
            Self::Midaxillary => "axilar medio",
            Self::Triceps => "tríceps",
            Self::Subscapular => "subescapular",
            Self::Abdomen => "abdomen",
            Self::Suprailiac => "suprailíaco",
            Self::Thigh => "muslo",
        }
    }
}

impl fmt::Display for SkinfoldSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinfoldSite {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let key = lowered.strip_suffix("_mm").unwrap_or(&lowered);
        match key {
            "chest" | "pecho" | "pectoral" => Ok(Self::Chest),
            "midaxillary" | "axilar" | "midaxilar" | "axila" => Ok(Self::Midaxillary),
            "triceps" | "tríceps" => Ok(Self::Triceps),
            "subscapular" | "subescapular" => Ok(Self::Subscapular),
            "abdomen" | "abdominal" => Ok(Self::Abdomen),
            "suprailiac" | "suprailiaco" | "suprailíaco" => Ok(Self::Suprailiac),
            "thigh" | "muslo" => Ok(Self::Thigh),
            other => Err(DomainError::UnknownValue {
                field: "skinfold_site",
                value: other.to_string(),
            }),
        }
    }
}

// ── ProgressPeriod ───────────────────────────────────────────────────────────

/// Window for progress evaluation and timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProgressPeriod {
    #[serde(rename = "semana")]
    Week,
    #[default]
    #[serde(rename = "mes")]
    Month,
    #[serde(rename = "anio")]
    Year,
}

impl ProgressPeriod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "semana",
            Self::Month => "mes",
            Self::Year => "anio",
        }
    }

    pub const fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

impl fmt::Display for ProgressPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semana" | "week" => Ok(Self::Week),
            "mes" | "month" => Ok(Self::Month),
            "anio" | "año" | "year" => Ok(Self::Year),
            other => Err(DomainError::UnknownValue {
                field: "periodo",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn gender_and_objective_are_not_trimmed() {
        assert!(" male ".parse::<Gender>().is_err());
        assert!("fat_loss ".parse::<FitnessObjective>().is_err());
        assert_eq!(
            "fat_loss".parse::<FitnessObjective>().unwrap(),
            FitnessObjective::FatLoss
        );
    }

    #[test]
    fn activity_level_matches_literals_only() {
        assert_eq!(
            ActivityLevel::from_multiplier(1.50),
            Some(ActivityLevel::ModeratelyActive)
        );
        assert_eq!(ActivityLevel::from_multiplier(1.45), None);
        assert_eq!(ActivityLevel::from_multiplier(1.499), None);
        assert_eq!(ActivityLevel::from_multiplier(f64::NAN), None);
    }

    #[test]
    fn activity_level_has_no_epsilon() {
        assert_eq!(ActivityLevel::from_multiplier(1.5000000000001), None);
        assert_eq!(ActivityLevel::from_multiplier(1.35 + 1e-12), None);
        assert_eq!("1.50000000000009".parse::<ActivityLevel>().ok(), None);
        assert_eq!(
            "1.5".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
    }

    #[test]
    fn activity_level_serialises_as_multiplier() {
        let json = serde_json::to_string(&ActivityLevel::Active).unwrap();
        assert_eq!(json, "1.65");
        let back: ActivityLevel = serde_json::from_str("1.8").unwrap();
        assert_eq!(back, ActivityLevel::VeryActive);
        assert!(serde_json::from_str::<ActivityLevel>("1.7").is_err());
    }

    #[test]
    fn activity_level_display_keeps_two_decimals() {
        assert_eq!(ActivityLevel::ModeratelyActive.to_string(), "1.50");
    }

    #[test]
    fn objective_uses_snake_case_wire_names() {
        assert_eq!(
            "body_recomp".parse::<FitnessObjective>().unwrap(),
            FitnessObjective::BodyRecomp
        );
        assert!("bulk".parse::<FitnessObjective>().is_err());
        assert_eq!(
            serde_json::to_string(&FitnessObjective::FatLoss).unwrap(),
            "\"fat_loss\""
        );
    }

    #[test]
    fn aggressiveness_only_one_to_three() {
        assert_eq!(
            "2".parse::<AggressivenessLevel>().unwrap(),
            AggressivenessLevel::Moderate
        );
        assert!("0".parse::<AggressivenessLevel>().is_err());
        assert!("4".parse::<AggressivenessLevel>().is_err());
        assert_eq!(
            serde_json::to_string(&AggressivenessLevel::Aggressive).unwrap(),
            "3"
        );
    }

    #[test]
    fn skinfold_site_accepts_spanish_aliases() {
        assert_eq!("pecho".parse::<SkinfoldSite>().unwrap(), SkinfoldSite::Chest);
        assert_eq!("muslo".parse::<SkinfoldSite>().unwrap(), SkinfoldSite::Thigh);
        assert_eq!(
            "thigh_mm".parse::<SkinfoldSite>().unwrap(),
            SkinfoldSite::Thigh
        );
        assert_eq!(SkinfoldSite::ALL.len(), 7);
    }

    #[test]
    fn progress_period_wire_names_are_spanish() {
        assert_eq!(
            serde_json::to_string(&ProgressPeriod::Year).unwrap(),
            "\"anio\""
        );
        assert_eq!("week".parse::<ProgressPeriod>().unwrap(), ProgressPeriod::Week);
    }
}
