//! Energy math the backend recomputes on every profile change.

use fitform_core::domain::{ActivityLevel, AggressivenessLevel, FitnessObjective, Gender};

use super::round1;

const CARB_SHARE: f64 = 0.50;
const PROTEIN_SHARE: f64 = 0.25;
const FAT_SHARE: f64 = 0.25;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Mifflin-St Jeor basal metabolic rate, kcal/day.
pub fn bmr(weight_kg: f64, height_cm: f64, age: i64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    let adjusted = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    round1(adjusted)
}

/// Total daily energy expenditure.
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    round1(bmr * activity.multiplier())
}

/// Calorie adjustment applied to TDEE for an objective, as a fraction.
pub fn objective_adjustment(objective: FitnessObjective, level: AggressivenessLevel) -> f64 {
    let step = f64::from(level.value());
    match objective {
        FitnessObjective::FatLoss => -(0.05 + 0.05 * step),
        FitnessObjective::MuscleGain => 0.05 * step,
        FitnessObjective::BodyRecomp => -0.05,
        FitnessObjective::Maintenance | FitnessObjective::Performance => 0.0,
    }
}

/// Daily calorie and macro targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub calories: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

pub fn targets(tdee: f64, objective: FitnessObjective, level: AggressivenessLevel) -> Targets {
    let calories = round1(tdee * (1.0 + objective_adjustment(objective, level)));
    Targets {
        calories,
        carbs_g: round1(calories * CARB_SHARE / KCAL_PER_G_CARB),
        protein_g: round1(calories * PROTEIN_SHARE / KCAL_PER_G_PROTEIN),
        fat_g: round1(calories * FAT_SHARE / KCAL_PER_G_FAT),
    }
}
