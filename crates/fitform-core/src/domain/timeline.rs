//! Text rendering of progress series.

use serde::Serialize;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// First/last/extremes of a numeric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    /// `last - first`
    pub delta: f64,
}

impl SeriesSummary {
    /// `None` for a series with no finite values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let mut summary = Self {
            count: 1,
            first,
            last: first,
            min: first,
            max: first,
            delta: 0.0,
        };
        for v in finite {
            summary.count += 1;
            summary.last = v;
            summary.min = summary.min.min(v);
            summary.max = summary.max.max(v);
        }
        summary.delta = summary.last - summary.first;
        Some(summary)
    }

    pub fn trend(&self) -> Trend {
        if self.delta.abs() < f64::EPSILON {
            Trend::Flat
        } else if self.delta > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub const fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
        }
    }
}

/// One block character per finite value, scaled between the series min and
/// max. A flat series renders at mid height.
pub fn sparkline(values: &[f64]) -> String {
    let Some(summary) = SeriesSummary::from_values(values) else {
        return String::new();
    };
    let span = summary.max - summary.min;

    values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| {
            if span <= f64::EPSILON {
                return BARS[BARS.len() / 2 - 1];
            }
            let scaled = (v - summary.min) / span * (BARS.len() - 1) as f64;
            BARS[(scaled.round() as usize).min(BARS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_series() {
        let s = SeriesSummary::from_values(&[80.0, 79.5, 81.0, 78.0]).unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.first, 80.0);
        assert_eq!(s.last, 78.0);
        assert_eq!(s.min, 78.0);
        assert_eq!(s.max, 81.0);
        assert_eq!(s.delta, -2.0);
        assert_eq!(s.trend(), Trend::Down);
    }

    #[test]
    fn summary_skips_non_finite() {
        assert!(SeriesSummary::from_values(&[]).is_none());
        assert!(SeriesSummary::from_values(&[f64::NAN]).is_none());
        let s = SeriesSummary::from_values(&[f64::NAN, 5.0, f64::INFINITY, 7.0]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.trend(), Trend::Up);
    }

    #[test]
    fn sparkline_spans_full_height() {
        assert_eq!(sparkline(&[0.0, 7.0]), "▁█");
        assert_eq!(sparkline(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]), "▁▂▃▄▅▆▇█");
    }

    #[test]
    fn sparkline_edge_cases() {
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[3.0, 3.0, 3.0]), "▄▄▄");
        assert_eq!(sparkline(&[1.0, f64::NAN, 2.0]).chars().count(), 2);
    }
}
