//! Free-text caliper readings, e.g. "pecho 12/13, abdomen 25 muslo 18,5".

use std::sync::LazyLock;

use regex::Regex;

use fitform_core::application::dto::SkinfoldParse;
use fitform_core::domain::{SkinfoldSite, SkinfoldValues};

/// Site aliases in match priority; the first alias found wins.
const ALIASES: &[(SkinfoldSite, &[&str])] = &[
    (SkinfoldSite::Chest, &["pecho", "pectoral", "chest"]),
    (
        SkinfoldSite::Midaxillary,
        &["axilar", "midaxilar", "midaxillary", "axila"],
    ),
    (SkinfoldSite::Triceps, &["triceps", "tríceps"]),
    (SkinfoldSite::Subscapular, &["subescapular", "subscapular"]),
    (SkinfoldSite::Abdomen, &["abdomen", "abdominal"]),
    (
        SkinfoldSite::Suprailiac,
        &["suprailiaco", "suprailíaco", "suprailiac"],
    ),
    (SkinfoldSite::Thigh, &["muslo", "thigh"]),
];

struct SitePattern {
    site: SkinfoldSite,
    alias: &'static str,
    regex: Regex,
}

static PATTERNS: LazyLock<Vec<SitePattern>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .flat_map(|(site, aliases)| aliases.iter().map(move |alias| (*site, *alias)))
        .map(|(site, alias)| SitePattern {
            site,
            alias,
            regex: Regex::new(&format!(
                r"{}[^0-9]*(\d+(?:[.,]\d+)?(?:\s*/\s*\d+(?:[.,]\d+)?){{0,2}})",
                regex::escape(alias)
            ))
            .expect("skinfold alias pattern is a valid regex"),
        })
        .collect()
});

fn average(raw: &str) -> Option<(f64, usize)> {
    let parts: Vec<f64> = raw
        .split('/')
        .filter_map(|part| part.trim().replace(',', ".").parse().ok())
        .collect();
    if parts.is_empty() {
        return None;
    }
    let mean = parts.iter().sum::<f64>() / parts.len() as f64;
    Some(((mean * 100.0).round() / 100.0, parts.len()))
}

/// Extracts one value per site. Up to three readings separated by `/` are
/// averaged.
pub fn parse(text: &str) -> SkinfoldParse {
    let lowered = text.to_lowercase();
    let mut parsed = SkinfoldValues::default();
    let mut warnings = Vec::new();

    for pattern in PATTERNS.iter() {
        if parsed.get(pattern.site).is_some() {
            continue;
        }
        let Some(captures) = pattern.regex.captures(&lowered) else {
            continue;
        };
        let Some((value, count)) = captures.get(1).and_then(|m| average(m.as_str())) else {
            continue;
        };
        if count > 1 {
            warnings.push(format!(
                "{}: se promediaron {} lecturas automáticamente.",
                pattern.alias, count
            ));
        }
        parsed.set(pattern.site, Some(value));
    }

    SkinfoldParse { parsed, warnings }
}
