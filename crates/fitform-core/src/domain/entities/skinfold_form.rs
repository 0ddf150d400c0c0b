use super::{integer, number, optional, parsed};
use crate::domain::constraints::Constraints;
use crate::domain::form::{Form, FormErrors, FormField, FormState};
use crate::domain::skinfold::{SkinfoldRequest, SkinfoldSheet, SkinfoldValues};
use crate::domain::validation::{FieldValidator, ValidationResult};
use crate::domain::value_objects::SkinfoldSite;

/// Key used for sheet-level errors (missing or out-of-range sites).
pub const SITES_KEY: &str = "skinfolds";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkinfoldField {
    Sex,
    Age,
    Weight,
}

impl FormField for SkinfoldField {
    const ALL: &'static [Self] = &[Self::Sex, Self::Age, Self::Weight];

    fn key(self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::Age => "age_years",
            Self::Weight => "weight_kg",
        }
    }
}

/// What a valid skinfold form submits: the payload plus the advisories that
/// were shown but did not block.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinfoldSubmission {
    pub request: SkinfoldRequest,
    pub warnings: Vec<String>,
}

/// Sex, age, optional weight and the seven-site reading sheet.
#[derive(Debug, Clone)]
pub struct SkinfoldForm {
    state: FormState<SkinfoldField>,
    sheet: SkinfoldSheet,
    validator: FieldValidator,
}

impl Default for SkinfoldForm {
    fn default() -> Self {
        Self::with_constraints(Constraints::STANDARD)
    }
}

impl SkinfoldForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraints(constraints: Constraints) -> Self {
        Self {
            state: FormState::new().validating_on_change(),
            sheet: SkinfoldSheet::with_constraints(&constraints),
            validator: FieldValidator::new(constraints),
        }
    }

    pub fn sheet(&self) -> &SkinfoldSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut SkinfoldSheet {
        &mut self.sheet
    }

    pub fn set_readings<I, S>(&mut self, site: SkinfoldSite, readings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheet.set_readings(site, readings);
    }

    /// Take over values parsed elsewhere (free text, history).
    pub fn fill_sites(&mut self, values: &SkinfoldValues) {
        self.sheet.fill_from(values);
    }

    /// Calculate is enabled once every site has a value, every value is in
    /// range, and sex and age pass.
    pub fn can_calculate(&self) -> bool {
        self.sheet.readiness().is_ready()
            && self.sheet.out_of_range(self.validator.constraints()).is_empty()
            && self.check(SkinfoldField::Sex).is_valid
            && self.check(SkinfoldField::Age).is_valid
    }

    /// Why calculate is disabled, if it is.
    pub fn gate_message(&self) -> Option<String> {
        self.sheet.readiness().message()
    }

    pub fn advisories(&self) -> Vec<String> {
        self.sheet.advisories(self.validator.constraints())
    }

    pub fn submit(&mut self) -> Result<SkinfoldSubmission, FormErrors> {
        self.validate_all()?;

        let sex = parsed(SkinfoldField::Sex, self.value(SkinfoldField::Sex))?;
        let age = integer(SkinfoldField::Age, self.value(SkinfoldField::Age))?;
        let weight = optional(self.value(SkinfoldField::Weight), |raw| {
            number(SkinfoldField::Weight, raw)
        })?;

        let mut request = SkinfoldRequest::new(sex, age, self.sheet.values());
        request.weight_kg = weight;

        Ok(SkinfoldSubmission {
            request,
            warnings: self.advisories(),
        })
    }
}

impl Form for SkinfoldForm {
    type Field = SkinfoldField;

    fn state(&self) -> &FormState<SkinfoldField> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState<SkinfoldField> {
        &mut self.state
    }

    fn check(&self, field: SkinfoldField) -> ValidationResult {
        let value = self.value(field);
        match field {
            SkinfoldField::Sex => self.validator.gender(value),
            SkinfoldField::Age => self.validator.age(value),
            SkinfoldField::Weight if value.trim().is_empty() => ValidationResult::ok(),
            SkinfoldField::Weight => self.validator.weight(value),
        }
    }

    fn check_form(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if let Some(message) = self.gate_message() {
            errors.push(SITES_KEY, message);
        }
        let c = self.validator.constraints();
        for (site, value) in self.sheet.out_of_range(c) {
            errors.push(
                SITES_KEY,
                format!(
                    "{}: {value} mm fuera de rango ({}-{} mm).",
                    site.label_es(),
                    c.min_skinfold_mm,
                    c.max_skinfold_mm
                ),
            );
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
