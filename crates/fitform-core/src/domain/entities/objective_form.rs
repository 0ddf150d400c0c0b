use serde::{Deserialize, Serialize};

use super::{integer, parsed};
use crate::domain::form::{Form, FormErrors, FormField, FormState};
use crate::domain::validation::{FieldValidator, ValidationResult, fields};
use crate::domain::value_objects::{AggressivenessLevel, FitnessObjective};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectiveField {
    Objective,
    AggressivenessLevel,
}

impl FormField for ObjectiveField {
    const ALL: &'static [Self] = &[Self::Objective, Self::AggressivenessLevel];

    fn key(self) -> &'static str {
        match self {
            Self::Objective => fields::OBJECTIVE,
            Self::AggressivenessLevel => fields::AGGRESSIVENESS_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveUpdate {
    pub objective: FitnessObjective,
    pub aggressiveness_level: AggressivenessLevel,
}

/// Objective picker. Aggressiveness defaults to moderate when left blank.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveForm {
    state: FormState<ObjectiveField>,
    validator: FieldValidator,
}

impl ObjectiveForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self) -> Result<ObjectiveUpdate, FormErrors> {
        self.validate_all()?;
        let objective = parsed(ObjectiveField::Objective, self.value(ObjectiveField::Objective))?;
        let raw_level = self.value(ObjectiveField::AggressivenessLevel);
        let aggressiveness_level = if raw_level.trim().is_empty() {
            AggressivenessLevel::default()
        } else {
            let value = integer(ObjectiveField::AggressivenessLevel, raw_level)?;
            AggressivenessLevel::try_from(value).map_err(|e| {
                FormErrors::single(ObjectiveField::AggressivenessLevel.key(), e.to_string())
            })?
        };
        Ok(ObjectiveUpdate {
            objective,
            aggressiveness_level,
        })
    }
}

impl Form for ObjectiveForm {
    type Field = ObjectiveField;

    fn state(&self) -> &FormState<ObjectiveField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<ObjectiveField> {
        &mut self.state
    }

    fn check(&self, field: ObjectiveField) -> ValidationResult {
        let value = self.value(field);
        match field {
            ObjectiveField::Objective => self.validator.objective(value.trim()),
            ObjectiveField::AggressivenessLevel if value.trim().is_empty() => {
                ValidationResult::ok()
            }
            ObjectiveField::AggressivenessLevel => self.validator.aggressiveness_level(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_moderate() {
        let mut form = ObjectiveForm::new();
        form.set(ObjectiveField::Objective, "muscle_gain");
        let update = form.submit().unwrap();
        assert_eq!(update.objective, FitnessObjective::MuscleGain);
        assert_eq!(update.aggressiveness_level, AggressivenessLevel::Moderate);
    }

    #[test]
    fn rejects_unknown_objective_and_level() {
        let mut form = ObjectiveForm::new();
        form.set(ObjectiveField::Objective, "bulk");
        form.set(ObjectiveField::AggressivenessLevel, "5");
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("aggressiveness_level"),
            Some("Aggressiveness level must be 1, 2 or 3")
        );
    }
}
