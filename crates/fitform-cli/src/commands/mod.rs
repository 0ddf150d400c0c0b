//! Command handlers, one module per subcommand.
//!
//! Local commands are synchronous. Commands that talk to a backend are
//! `async` and receive the wired [`App`](crate::app::App).

pub mod auth;
pub mod completions;
pub mod config;
pub mod constraints;
pub mod init;
pub mod meal;
pub mod objective;
pub mod profile;
pub mod progress;
pub mod skinfold;
pub mod validate;

/// `12.3` style number, or `-` when absent.
pub(crate) fn opt1(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Whole number with unit, or `-` when absent.
pub(crate) fn opt0(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0} {unit}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_numbers_render_a_dash() {
        assert_eq!(opt1(None), "-");
        assert_eq!(opt1(Some(12.345)), "12.3");
        assert_eq!(opt0(Some(2150.4), "kcal"), "2150 kcal");
        assert_eq!(opt0(None, "kcal"), "-");
    }
}
