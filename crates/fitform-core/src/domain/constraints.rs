//! Shared constraint table.
//!
//! # Design
//!
//! Every bound the backend enforces on user input lives in [`Constraints`].
//! Validators, forms and the demo backend all read from the same value, and
//! the table serialises to JSON so a server can publish (or consume) the
//! exact numbers the client checks against.
//!
//! Discrete sets (activity multipliers, objectives, aggressiveness) are not
//! duplicated here: they are the variants of the enums in
//! `value_objects.rs`, and [`Constraints::activity_levels`] and friends just
//! expose those.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ActivityLevel, AggressivenessLevel, FitnessObjective};

/// Numeric bounds for every validated field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub max_email_length: usize,
    pub min_password_length: usize,
    /// bcrypt only hashes the first 72 bytes.
    pub password_byte_limit: usize,
    pub max_name_length: usize,

    pub min_age: i64,
    pub max_age: i64,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub min_height_cm: f64,
    pub max_height_cm: f64,

    pub min_skinfold_mm: f64,
    pub max_skinfold_mm: f64,
    /// Values above this are flagged but never block submission.
    pub skinfold_warning_mm: f64,
    pub max_skinfold_readings: usize,
    pub skinfold_recommended_min_age: i64,
    pub skinfold_recommended_max_age: i64,

    pub min_meal_text: usize,
    pub max_meal_text: usize,
}

impl Constraints {
    /// The bounds the production backend ships with.
    pub const STANDARD: Self = Self {
        max_email_length: 254,
        min_password_length: 8,
        password_byte_limit: 72,
        max_name_length: 100,

        min_age: 1,
        max_age: 120,
        min_weight_kg: 20.0,
        max_weight_kg: 300.0,
        min_height_cm: 100.0,
        max_height_cm: 250.0,

        min_skinfold_mm: 1.0,
        max_skinfold_mm: 100.0,
        skinfold_warning_mm: 60.0,
        max_skinfold_readings: 3,
        skinfold_recommended_min_age: 18,
        skinfold_recommended_max_age: 61,

        min_meal_text: 3,
        max_meal_text: 3000,
    };

    pub fn activity_levels(&self) -> &'static [ActivityLevel] {
        ActivityLevel::ALL
    }

    pub fn objectives(&self) -> &'static [FitnessObjective] {
        FitnessObjective::ALL
    }

    pub fn aggressiveness_levels(&self) -> &'static [AggressivenessLevel] {
        AggressivenessLevel::ALL
    }

    pub fn age_in_range(&self, age: i64) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    pub fn weight_in_range(&self, kg: f64) -> bool {
        (self.min_weight_kg..=self.max_weight_kg).contains(&kg)
    }

    pub fn height_in_range(&self, cm: f64) -> bool {
        (self.min_height_cm..=self.max_height_cm).contains(&cm)
    }

    pub fn skinfold_in_range(&self, mm: f64) -> bool {
        (self.min_skinfold_mm..=self.max_skinfold_mm).contains(&mm)
    }

    /// Full schema, including the discrete sets, as a JSON document.
    pub fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "bounds": self,
            "activity_levels": self
                .activity_levels()
                .iter()
                .map(|l| l.multiplier())
                .collect::<Vec<_>>(),
            "objectives": self
                .objectives()
                .iter()
                .map(|o| o.as_str())
                .collect::<Vec<_>>(),
            "aggressiveness_levels": self
                .aggressiveness_levels()
                .iter()
                .map(|a| a.value())
                .collect::<Vec<_>>(),
        })
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_inclusive() {
        let c = Constraints::STANDARD;
        assert!(c.age_in_range(1));
        assert!(c.age_in_range(120));
        assert!(!c.age_in_range(0));
        assert!(!c.age_in_range(121));
        assert!(c.weight_in_range(20.0));
        assert!(c.weight_in_range(300.0));
        assert!(!c.weight_in_range(19.99));
        assert!(c.height_in_range(250.0));
        assert!(!c.height_in_range(250.01));
    }

    #[test]
    fn warning_threshold_sits_inside_hard_bounds() {
        let c = Constraints::STANDARD;
        assert!(c.skinfold_in_range(c.skinfold_warning_mm));
        assert!(c.skinfold_warning_mm < c.max_skinfold_mm);
    }

    #[test]
    fn schema_lists_discrete_sets() {
        let schema = Constraints::STANDARD.schema();
        assert_eq!(schema["activity_levels"].as_array().unwrap().len(), 5);
        assert_eq!(schema["objectives"][1], "fat_loss");
        assert_eq!(schema["bounds"]["password_byte_limit"], 72);
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&Constraints::STANDARD).unwrap();
        let back: Constraints = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Constraints::STANDARD);
    }
}
