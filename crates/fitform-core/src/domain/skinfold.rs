//! Skinfold readings and body-fat estimation.
//!
//! # Design
//!
//! Each of the seven sites takes up to three raw caliper readings. The site
//! value is the mean of the readings that parse, rounded to two decimals;
//! a site with no parseable reading is "not measured yet".
//!
//! The estimate itself (Jackson-Pollock + Siri) normally runs on the backend.
//! It lives here too so the offline backend and the client agree on the
//! numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::constraints::Constraints;
use crate::domain::error::DomainError;
use crate::domain::value_objects::{Gender, SkinfoldSite};

/// Mean of the readings that parse, rounded to two decimals.
///
/// Blank and unparseable entries are ignored. `None` when nothing parsed.
/// Accepts `,` as decimal separator.
pub fn average_readings<S: AsRef<str>>(readings: &[S]) -> Option<f64> {
    let parsed: Vec<f64> = readings
        .iter()
        .filter_map(|r| parse_reading(r.as_ref()))
        .collect();

    if parsed.is_empty() {
        return None;
    }
    let mean = parsed.iter().sum::<f64>() / parsed.len() as f64;
    Some(round_to(mean, 2))
}

fn parse_reading(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Advisory shown for a site above the warning threshold.
pub fn high_value_warning(site: SkinfoldSite) -> String {
    format!(
        "{}: valor alto (>60 mm), revisar técnica de medición.",
        site.as_str()
    )
}

// ── Values ───────────────────────────────────────────────────────────────────

/// One averaged value per site, in millimetres. Wire shape of the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinfoldValues {
    pub chest_mm: Option<f64>,
    pub midaxillary_mm: Option<f64>,
    pub triceps_mm: Option<f64>,
    pub subscapular_mm: Option<f64>,
    pub abdomen_mm: Option<f64>,
    pub suprailiac_mm: Option<f64>,
    pub thigh_mm: Option<f64>,
}

impl SkinfoldValues {
    pub fn get(&self, site: SkinfoldSite) -> Option<f64> {
        match site {
            SkinfoldSite::Chest => self.chest_mm,
            SkinfoldSite::Midaxillary => self.midaxillary_mm,
            SkinfoldSite::Triceps => self.triceps_mm,
            SkinfoldSite::Subscapular => self.subscapular_mm,
            SkinfoldSite::Abdomen => self.abdomen_mm,
            SkinfoldSite::Suprailiac => self.suprailiac_mm,
            SkinfoldSite::Thigh => self.thigh_mm,
        }
    }

    pub fn set(&mut self, site: SkinfoldSite, value: Option<f64>) {
        let slot = match site {
            SkinfoldSite::Chest => &mut self.chest_mm,
            SkinfoldSite::Midaxillary => &mut self.midaxillary_mm,
            SkinfoldSite::Triceps => &mut self.triceps_mm,
            SkinfoldSite::Subscapular => &mut self.subscapular_mm,
            SkinfoldSite::Abdomen => &mut self.abdomen_mm,
            SkinfoldSite::Suprailiac => &mut self.suprailiac_mm,
            SkinfoldSite::Thigh => &mut self.thigh_mm,
        };
        *slot = value;
    }

    /// Measured sites with their values, in display order.
    pub fn measured(&self) -> impl Iterator<Item = (SkinfoldSite, f64)> + '_ {
        SkinfoldSite::ALL
            .iter()
            .filter_map(|site| self.get(*site).map(|v| (*site, v)))
    }

    pub fn has_all(&self, sites: &[SkinfoldSite]) -> bool {
        sites.iter().all(|s| self.get(*s).is_some())
    }

    fn sum_of(&self, sites: &[SkinfoldSite]) -> f64 {
        sites.iter().filter_map(|s| self.get(*s)).sum()
    }
}

/// Calculation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinfoldRequest {
    pub sex: Gender,
    pub age_years: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(flatten)]
    pub values: SkinfoldValues,
    #[serde(default = "default_unit")]
    pub measurement_unit: String,
}

fn default_unit() -> String {
    "mm".to_string()
}

impl SkinfoldRequest {
    pub fn new(sex: Gender, age_years: i64, values: SkinfoldValues) -> Self {
        Self {
            sex,
            age_years,
            weight_kg: None,
            values,
            measurement_unit: default_unit(),
        }
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }
}

// ── Sheet ────────────────────────────────────────────────────────────────────

/// Whether every site has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Missing(usize),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Message shown next to the disabled calculate action.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Ready => None,
            Self::Missing(1) => Some("Falta 1 pliegue para completar los 7 sitios.".to_string()),
            Self::Missing(n) => Some(format!(
                "Faltan {n} pliegues para completar los 7 sitios."
            )),
        }
    }
}

/// Raw readings per site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinfoldSheet {
    readings: BTreeMap<SkinfoldSite, Vec<String>>,
    max_readings: usize,
}

impl Default for SkinfoldSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl SkinfoldSheet {
    pub fn new() -> Self {
        Self::with_constraints(&Constraints::STANDARD)
    }

    pub fn with_constraints(constraints: &Constraints) -> Self {
        Self {
            readings: BTreeMap::new(),
            max_readings: constraints.max_skinfold_readings,
        }
    }

    /// Replace the readings of a site. Extra readings beyond the limit are
    /// dropped.
    pub fn set_readings<I, S>(&mut self, site: SkinfoldSite, readings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let readings: Vec<String> = readings
            .into_iter()
            .take(self.max_readings)
            .map(Into::into)
            .collect();
        self.readings.insert(site, readings);
    }

    /// Set reading slot `index` (0-based). Out-of-range slots are ignored.
    pub fn set_reading(&mut self, site: SkinfoldSite, index: usize, raw: impl Into<String>) {
        if index >= self.max_readings {
            return;
        }
        let slots = self.readings.entry(site).or_default();
        if slots.len() <= index {
            slots.resize(index + 1, String::new());
        }
        slots[index] = raw.into();
    }

    pub fn readings(&self, site: SkinfoldSite) -> &[String] {
        self.readings.get(&site).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear_site(&mut self, site: SkinfoldSite) {
        self.readings.remove(&site);
    }

    pub fn site_value(&self, site: SkinfoldSite) -> Option<f64> {
        average_readings(self.readings(site))
    }

    pub fn values(&self) -> SkinfoldValues {
        let mut values = SkinfoldValues::default();
        for &site in SkinfoldSite::ALL {
            values.set(site, self.site_value(site));
        }
        values
    }

    pub fn missing_sites(&self) -> Vec<SkinfoldSite> {
        SkinfoldSite::ALL
            .iter()
            .copied()
            .filter(|site| self.site_value(*site).is_none())
            .collect()
    }

    pub fn readiness(&self) -> Readiness {
        match self.missing_sites().len() {
            0 => Readiness::Ready,
            n => Readiness::Missing(n),
        }
    }

    /// Fill sites from already-averaged values (e.g. parsed text). Sites
    /// without a value keep their current readings.
    pub fn fill_from(&mut self, values: &SkinfoldValues) {
        for (site, value) in values.measured() {
            self.set_readings(site, [format!("{value}")]);
        }
    }

    /// Non-blocking warnings for unusually high values.
    pub fn advisories(&self, constraints: &Constraints) -> Vec<String> {
        self.values()
            .measured()
            .filter(|(_, v)| *v > constraints.skinfold_warning_mm)
            .map(|(site, _)| high_value_warning(site))
            .collect()
    }

    /// Sites whose averaged value falls outside the hard bounds.
    pub fn out_of_range(&self, constraints: &Constraints) -> Vec<(SkinfoldSite, f64)> {
        self.values()
            .measured()
            .filter(|(_, v)| !constraints.skinfold_in_range(*v))
            .collect()
    }
}

// ── Estimation ───────────────────────────────────────────────────────────────

pub const METHOD_JP7: &str = "Jackson-Pollock 7 + Siri";
pub const METHOD_JP3: &str = "Jackson-Pollock 3 + Siri (fallback)";

const AGE_WARNING: &str =
    "La edad está fuera del rango validado clásico de la ecuación (18-61). Interpretar con cautela.";
const JP3_WARNING: &str = "Se usó fallback JP3 por pliegues incompletos para JP7. JP7 ofrece mejor precisión dentro de métodos con caliper.";
const RANGE_WARNING: &str =
    "El % de grasa está fuera del rango habitual (0-70). Revisar mediciones y técnica.";
const MISSING_SITES: &str = "Faltan pliegues para JP7. Completa los 7 sitios o al menos pecho/abdomen/muslo para fallback JP3.";
const BAD_DENSITY: &str = "Invalid body density. Revisa las mediciones ingresadas.";

/// Body composition derived from a skinfold request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatEstimate {
    pub method: String,
    pub sum_of_skinfolds_mm: f64,
    pub body_density: f64,
    pub body_fat_percent: f64,
    pub fat_free_mass_percent: f64,
    #[serde(default)]
    pub fat_mass_kg: Option<f64>,
    #[serde(default)]
    pub lean_mass_kg: Option<f64>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Jackson-Pollock 7-site density, or the 3-site equation when only chest,
/// abdomen and thigh are present, then Siri for body fat.
pub fn estimate_body_fat(
    request: &SkinfoldRequest,
    constraints: &Constraints,
) -> Result<BodyFatEstimate, DomainError> {
    let mut warnings = Vec::new();
    let age = request.age_years as f64;

    if request.age_years < constraints.skinfold_recommended_min_age
        || request.age_years > constraints.skinfold_recommended_max_age
    {
        warnings.push(AGE_WARNING.to_string());
    }

    for (site, value) in request.values.measured() {
        if value > constraints.skinfold_warning_mm {
            warnings.push(high_value_warning(site));
        }
    }

    let (method, sum, density) = if request.values.has_all(SkinfoldSite::ALL) {
        let s = request.values.sum_of(SkinfoldSite::ALL);
        let density = match request.sex {
            Gender::Male => 1.112 - 0.00043499 * s + 0.00000055 * s * s - 0.00028826 * age,
            Gender::Female => 1.097 - 0.00046971 * s + 0.00000056 * s * s - 0.00012828 * age,
        };
        (METHOD_JP7, s, density)
    } else if request.values.has_all(SkinfoldSite::JP3) {
        let s = request.values.sum_of(SkinfoldSite::JP3);
        warnings.push(JP3_WARNING.to_string());
        let density = match request.sex {
            Gender::Male => 1.10938 - 0.0008267 * s + 0.0000016 * s * s - 0.0002574 * age,
            Gender::Female => 1.0994921 - 0.0009929 * s + 0.0000023 * s * s - 0.0001392 * age,
        };
        (METHOD_JP3, s, density)
    } else {
        return Err(DomainError::BodyFatUnavailable(MISSING_SITES.to_string()));
    };

    if density <= 0.0 || !density.is_finite() {
        return Err(DomainError::BodyFatUnavailable(BAD_DENSITY.to_string()));
    }

    let body_fat = 495.0 / density - 450.0;
    if !(0.0..=70.0).contains(&body_fat) {
        warnings.push(RANGE_WARNING.to_string());
    }

    let fat_mass = request.weight_kg.map(|w| w * body_fat / 100.0);
    let lean_mass = request.weight_kg.zip(fat_mass).map(|(w, f)| w - f);

    Ok(BodyFatEstimate {
        method: method.to_string(),
        sum_of_skinfolds_mm: round_to(sum, 2),
        body_density: round_to(density, 4),
        body_fat_percent: round_to(body_fat, 2),
        fat_free_mass_percent: round_to(100.0 - body_fat, 2),
        fat_mass_kg: fat_mass.map(|v| round_to(v, 2)),
        lean_mass_kg: lean_mass.map(|v| round_to(v, 2)),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sites(value: f64) -> SkinfoldValues {
        let mut values = SkinfoldValues::default();
        for &site in SkinfoldSite::ALL {
            values.set(site, Some(value));
        }
        values
    }

    #[test]
    fn average_ignores_blanks() {
        assert_eq!(average_readings(&["10", "12", ""]), Some(11.0));
        assert_eq!(average_readings(&["", "", ""]), None);
        assert_eq!(average_readings::<&str>(&[]), None);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        assert_eq!(average_readings(&["10", "10", "11"]), Some(10.33));
        assert_eq!(average_readings(&["12,5"]), Some(12.5));
        assert_eq!(average_readings(&["abc", "8"]), Some(8.0));
    }

    #[test]
    fn readiness_counts_missing_sites() {
        let mut sheet = SkinfoldSheet::new();
        for &site in &SkinfoldSite::ALL[..5] {
            sheet.set_readings(site, ["10"]);
        }
        assert_eq!(sheet.readiness(), Readiness::Missing(2));
        assert_eq!(
            sheet.readiness().message().unwrap(),
            "Faltan 2 pliegues para completar los 7 sitios."
        );

        sheet.set_readings(SkinfoldSite::Suprailiac, ["9", "", ""]);
        assert_eq!(
            sheet.readiness().message().unwrap(),
            "Falta 1 pliegue para completar los 7 sitios."
        );

        sheet.set_reading(SkinfoldSite::Thigh, 1, "14");
        assert!(sheet.readiness().is_ready());
        assert_eq!(sheet.readiness().message(), None);
    }

    #[test]
    fn sheet_keeps_at_most_three_readings() {
        let mut sheet = SkinfoldSheet::new();
        sheet.set_readings(SkinfoldSite::Chest, ["10", "11", "12", "40"]);
        assert_eq!(sheet.readings(SkinfoldSite::Chest).len(), 3);
        assert_eq!(sheet.site_value(SkinfoldSite::Chest), Some(11.0));
        sheet.set_reading(SkinfoldSite::Chest, 5, "99");
        assert_eq!(sheet.site_value(SkinfoldSite::Chest), Some(11.0));
    }

    #[test]
    fn high_values_warn_without_blocking() {
        let mut sheet = SkinfoldSheet::new();
        sheet.set_readings(SkinfoldSite::Abdomen, ["61"]);
        let c = Constraints::STANDARD;
        assert_eq!(
            sheet.advisories(&c),
            vec!["abdomen: valor alto (>60 mm), revisar técnica de medición.".to_string()]
        );
        assert!(sheet.out_of_range(&c).is_empty());

        sheet.set_readings(SkinfoldSite::Thigh, ["120"]);
        assert_eq!(sheet.out_of_range(&c), vec![(SkinfoldSite::Thigh, 120.0)]);
    }

    #[test]
    fn fill_from_parsed_values() {
        let mut sheet = SkinfoldSheet::new();
        sheet.set_readings(SkinfoldSite::Triceps, ["7"]);
        let mut parsed = SkinfoldValues::default();
        parsed.chest_mm = Some(11.5);
        sheet.fill_from(&parsed);
        assert_eq!(sheet.site_value(SkinfoldSite::Chest), Some(11.5));
        assert_eq!(sheet.site_value(SkinfoldSite::Triceps), Some(7.0));
    }

    #[test]
    fn jp7_male_reference_values() {
        let request = SkinfoldRequest::new(Gender::Male, 30, all_sites(10.0)).with_weight(80.0);
        let estimate = estimate_body_fat(&request, &Constraints::STANDARD).unwrap();
        assert_eq!(estimate.method, METHOD_JP7);
        assert_eq!(estimate.sum_of_skinfolds_mm, 70.0);
        assert!((estimate.body_density - 1.0756).abs() < 1e-4);
        assert!((estimate.body_fat_percent - 10.21).abs() < 0.01);
        assert!((estimate.fat_mass_kg.unwrap() - 8.17).abs() < 0.01);
        assert!(estimate.warnings.is_empty());
    }

    #[test]
    fn jp3_fallback_with_warning() {
        let mut values = SkinfoldValues::default();
        for &site in SkinfoldSite::JP3 {
            values.set(site, Some(10.0));
        }
        let request = SkinfoldRequest::new(Gender::Male, 30, values);
        let estimate = estimate_body_fat(&request, &Constraints::STANDARD).unwrap();
        assert_eq!(estimate.method, METHOD_JP3);
        assert!((estimate.body_fat_percent - 9.06).abs() < 0.01);
        assert!(estimate.warnings[0].contains("fallback JP3"));
        assert_eq!(estimate.fat_mass_kg, None);
    }

    #[test]
    fn missing_sites_is_an_error() {
        let mut values = SkinfoldValues::default();
        values.chest_mm = Some(10.0);
        let request = SkinfoldRequest::new(Gender::Female, 30, values);
        let err = estimate_body_fat(&request, &Constraints::STANDARD).unwrap_err();
        assert!(err.to_string().starts_with("Faltan pliegues para JP7"));
    }

    #[test]
    fn age_and_high_site_warnings() {
        let mut values = all_sites(20.0);
        values.thigh_mm = Some(65.0);
        let request = SkinfoldRequest::new(Gender::Female, 70, values);
        let estimate = estimate_body_fat(&request, &Constraints::STANDARD).unwrap();
        assert!(estimate.warnings.iter().any(|w| w.contains("18-61")));
        assert!(estimate.warnings.iter().any(|w| w.starts_with("thigh: valor alto")));
    }

    #[test]
    fn request_serialises_flat() {
        let request = SkinfoldRequest::new(Gender::Female, 28, all_sites(12.0));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["sex"], "female");
        assert_eq!(json["chest_mm"], 12.0);
        assert_eq!(json["measurement_unit"], "mm");
        assert!(json.get("weight_kg").is_none());
    }
}
