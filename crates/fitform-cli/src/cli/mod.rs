//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.
//!
//! Form fields are taken as raw strings on purpose: the core forms parse and
//! validate them, so rejections come back localized.

use clap::{Args, Parser, Subcommand, ValueEnum};

use fitform_core::domain::{ProgressPeriod, SkinfoldSite};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fitform",
    bin_name = "fitform",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Fitness tracking from the terminal",
    long_about = "fitform validates your data the way the backend does, \
                  estimates body fat from skinfolds, logs meals and scores \
                  your progress towards an objective.",
    after_help = "EXAMPLES:\n\
        \x20 fitform --offline login --email demo@fitform.app --password demo12345\n\
        \x20 fitform skinfold calc --sex male --age 30 --chest 10 --abdomen 20 --thigh 15\n\
        \x20 fitform meal parse \"200 g de arroz\" --log\n\
        \x20 fitform progress --period semana --timeline",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a single field value against the registration rules.
    #[command(
        about = "Validate one field value",
        after_help = "EXAMPLES:\n\
            \x20 fitform validate email ana@example.com\n\
            \x20 fitform validate activity_level 1.50\n\
            \x20 fitform validate password short"
    )]
    Validate(ValidateArgs),

    /// Print the validation bounds shared with the backend.
    #[command(about = "Show field constraints")]
    Constraints,

    /// Create an account.
    #[command(
        visible_alias = "signup",
        about = "Create an account",
        after_help = "Missing fields are prompted for when stdin is a terminal.\n\n\
            EXAMPLES:\n\
            \x20 fitform register\n\
            \x20 fitform register --email ana@example.com --first-name Ana --last-name Ruiz \\\n\
            \x20     --age 30 --gender female --weight 60 --height 165 \\\n\
            \x20     --activity-level 1.50 --objective maintenance"
    )]
    Register(RegisterArgs),

    /// Sign in and store the session.
    #[command(
        about = "Sign in",
        after_help = "EXAMPLES:\n\
            \x20 fitform login --email ana@example.com\n\
            \x20 FITFORM_PASSWORD=... fitform login --email ana@example.com"
    )]
    Login(LoginArgs),

    /// Forget the stored session.
    #[command(about = "Sign out")]
    Logout,

    /// Show or edit the signed-in profile.
    #[command(about = "Profile management", subcommand)]
    Profile(ProfileCommands),

    /// Set the fitness objective and how aggressively to pursue it.
    #[command(
        about = "Set objective",
        after_help = "EXAMPLES:\n\
            \x20 fitform objective fat_loss --level 2\n\
            \x20 fitform objective maintenance"
    )]
    Objective(ObjectiveArgs),

    /// Skinfold measurements.
    #[command(visible_alias = "sf", about = "Skinfold measurements", subcommand)]
    Skinfold(SkinfoldCommands),

    /// Meal estimates.
    #[command(about = "Meal parsing and logging", subcommand)]
    Meal(MealCommands),

    /// Evaluate progress towards the objective.
    #[command(
        about = "Evaluate progress",
        after_help = "EXAMPLES:\n\
            \x20 fitform progress\n\
            \x20 fitform progress --period anio --timeline"
    )]
    Progress(ProgressArgs),

    /// Initialise a fitform configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fitform init\n\
            \x20 fitform --config ./fitform.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fitform completions bash > ~/.local/share/bash-completion/completions/fitform\n\
            \x20 fitform completions zsh  > ~/.zfunc/_fitform\n\
            \x20 fitform completions fish > ~/.config/fish/completions/fitform.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the fitform configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fitform config get api.base_url\n\
            \x20 fitform config list"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `fitform validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Field key, e.g. `email`, `age`, `activity_level`.
    #[arg(value_name = "FIELD", help = "Field to validate")]
    pub field: String,

    /// Raw value, validated exactly as typed.
    #[arg(value_name = "VALUE", help = "Value to check", allow_hyphen_values = true)]
    pub value: String,
}

// ── register / login ──────────────────────────────────────────────────────────

/// Arguments for `fitform register`.
#[derive(Debug, Default, Args)]
pub struct RegisterArgs {
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    #[arg(long, value_name = "PASSWORD", env = "FITFORM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub first_name: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub last_name: Option<String>,

    #[arg(long, value_name = "YEARS", allow_hyphen_values = true)]
    pub age: Option<String>,

    /// `male` or `female`.
    #[arg(long, value_name = "GENDER")]
    pub gender: Option<String>,

    /// Kilograms.
    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Centimetres.
    #[arg(long, value_name = "CM", allow_hyphen_values = true)]
    pub height: Option<String>,

    /// One of 1.20, 1.35, 1.50, 1.65, 1.80.
    #[arg(long, value_name = "MULTIPLIER")]
    pub activity_level: Option<String>,

    /// fat_loss, muscle_gain, maintenance, body_recomp or performance.
    #[arg(long, value_name = "OBJECTIVE")]
    pub objective: Option<String>,

    /// 1, 2 or 3.
    #[arg(long = "level", value_name = "LEVEL")]
    pub aggressiveness_level: Option<String>,

    /// Never prompt; missing fields are reported as errors.
    #[arg(long = "no-input", help = "Do not prompt for missing fields")]
    pub no_input: bool,
}

/// Arguments for `fitform login`.
#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    #[arg(long, value_name = "PASSWORD", env = "FITFORM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long = "no-input", help = "Do not prompt for missing fields")]
    pub no_input: bool,
}

// ── profile ───────────────────────────────────────────────────────────────────

/// Subcommands for `fitform profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Print the signed-in profile with its energy targets.
    Show,
    /// Change biometrics. Omitted fields keep their value.
    Update(ProfileUpdateArgs),
}

#[derive(Debug, Default, Args)]
pub struct ProfileUpdateArgs {
    #[arg(long, value_name = "NAME")]
    pub first_name: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub last_name: Option<String>,

    #[arg(long, value_name = "YEARS", allow_hyphen_values = true)]
    pub age: Option<String>,

    #[arg(long, value_name = "GENDER")]
    pub gender: Option<String>,

    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,

    #[arg(long, value_name = "CM", allow_hyphen_values = true)]
    pub height: Option<String>,

    #[arg(long, value_name = "MULTIPLIER")]
    pub activity_level: Option<String>,
}

// ── objective ─────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ObjectiveArgs {
    /// fat_loss, muscle_gain, maintenance, body_recomp or performance.
    #[arg(value_name = "OBJECTIVE")]
    pub objective: String,

    /// Aggressiveness 1-3. Defaults to 2.
    #[arg(short = 'l', long = "level", value_name = "LEVEL")]
    pub level: Option<String>,
}

// ── skinfold ──────────────────────────────────────────────────────────────────

/// Subcommands for `fitform skinfold`.
#[derive(Debug, Subcommand)]
pub enum SkinfoldCommands {
    /// Estimate body fat from caliper readings.
    #[command(after_help = "Each site takes up to three readings separated by '/'.\n\n\
        EXAMPLES:\n\
        \x20 fitform skinfold calc --sex male --age 30 --chest 10/11 --midaxillary 12 \\\n\
        \x20     --triceps 9 --subscapular 14 --abdomen 20 --suprailiac 15 --thigh 16")]
    Calc(SkinfoldCalcArgs),

    /// Read caliper values out of free text.
    #[command(after_help = "EXAMPLES:\n\
        \x20 fitform skinfold parse \"pecho 10/12, abdomen 20, muslo 15\"\n\
        \x20 fitform skinfold parse \"pecho 10 abdomen 20 muslo 15\" --calc --sex male --age 30")]
    Parse(SkinfoldParseArgs),

    /// List past measurements, newest first.
    History,
}

/// Who was measured.
#[derive(Debug, Default, Args)]
pub struct SubjectArgs {
    /// `male` or `female`.
    #[arg(long, value_name = "SEX")]
    pub sex: Option<String>,

    #[arg(long, value_name = "YEARS", allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Body weight in kg; defaults to the profile weight.
    #[arg(long, value_name = "KG", allow_hyphen_values = true)]
    pub weight: Option<String>,
}

/// Readings per site.
#[derive(Debug, Default, Args)]
pub struct SiteArgs {
    #[arg(long, value_name = "MM")]
    pub chest: Option<String>,
    #[arg(long, value_name = "MM")]
    pub midaxillary: Option<String>,
    #[arg(long, value_name = "MM")]
    pub triceps: Option<String>,
    #[arg(long, value_name = "MM")]
    pub subscapular: Option<String>,
    #[arg(long, value_name = "MM")]
    pub abdomen: Option<String>,
    #[arg(long, value_name = "MM")]
    pub suprailiac: Option<String>,
    #[arg(long, value_name = "MM")]
    pub thigh: Option<String>,
}

impl SiteArgs {
    /// Raw reading strings keyed by site, in sheet order.
    pub fn entries(&self) -> Vec<(SkinfoldSite, &str)> {
        [
            (SkinfoldSite::Chest, &self.chest),
            (SkinfoldSite::Midaxillary, &self.midaxillary),
            (SkinfoldSite::Triceps, &self.triceps),
            (SkinfoldSite::Subscapular, &self.subscapular),
            (SkinfoldSite::Abdomen, &self.abdomen),
            (SkinfoldSite::Suprailiac, &self.suprailiac),
            (SkinfoldSite::Thigh, &self.thigh),
        ]
        .into_iter()
        .filter_map(|(site, raw)| raw.as_deref().map(|r| (site, r)))
        .collect()
    }
}

#[derive(Debug, Args)]
pub struct SkinfoldCalcArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    #[command(flatten)]
    pub sites: SiteArgs,
}

#[derive(Debug, Args)]
pub struct SkinfoldParseArgs {
    /// Free text such as "pecho 10/12, abdomen 20".
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Calculate body fat from the parsed values.
    #[arg(long = "calc")]
    pub calculate: bool,

    #[command(flatten)]
    pub subject: SubjectArgs,
}

// ── meal ──────────────────────────────────────────────────────────────────────

/// Subcommands for `fitform meal`.
#[derive(Debug, Subcommand)]
pub enum MealCommands {
    /// Estimate calories and macros from a description.
    #[command(after_help = "EXAMPLES:\n\
        \x20 fitform meal parse \"200 g de arroz\"\n\
        \x20 fitform meal parse \"2 huevos\" --log")]
    Parse(MealParseArgs),
}

#[derive(Debug, Args)]
pub struct MealParseArgs {
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Also save the estimate to the meal log.
    #[arg(long)]
    pub log: bool,
}

// ── progress ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProgressArgs {
    /// Window to evaluate: semana, mes or anio.
    #[arg(short = 'p', long = "period", value_name = "PERIOD", default_value = "mes")]
    pub period: ProgressPeriod,

    /// Also print weight, body-fat and calorie charts.
    #[arg(short = 't', long = "timeline")]
    pub timeline: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fitform init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fitform completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `fitform config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `api.base_url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_color_is_a_plain_switch() {
        let cli = Cli::parse_from(["fitform", "--no-color", "constraints"]);
        assert!(cli.global.no_color);
        assert!(Cli::try_parse_from(["fitform", "--no-color", "1", "constraints"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["fitform", "-v", "-q", "constraints"]);
        assert!(result.is_err());
    }

    #[test]
    fn period_accepts_spanish_and_english() {
        let cli = Cli::parse_from(["fitform", "progress", "--period", "week"]);
        let Commands::Progress(args) = cli.command else {
            panic!("expected progress");
        };
        assert_eq!(args.period, ProgressPeriod::Week);

        let cli = Cli::parse_from(["fitform", "progress"]);
        let Commands::Progress(args) = cli.command else {
            panic!("expected progress");
        };
        assert_eq!(args.period, ProgressPeriod::Month);
        assert!(!args.timeline);
    }

    #[test]
    fn unknown_period_is_rejected() {
        assert!(Cli::try_parse_from(["fitform", "progress", "--period", "decade"]).is_err());
    }

    #[test]
    fn site_entries_skip_missing_sites() {
        let cli = Cli::parse_from([
            "fitform", "skinfold", "calc", "--chest", "10/12", "--thigh", "15",
        ]);
        let Commands::Skinfold(SkinfoldCommands::Calc(args)) = cli.command else {
            panic!("expected skinfold calc");
        };
        assert_eq!(
            args.sites.entries(),
            vec![(SkinfoldSite::Chest, "10/12"), (SkinfoldSite::Thigh, "15")]
        );
    }

    #[test]
    fn offline_flag_is_global() {
        let cli = Cli::parse_from(["fitform", "meal", "parse", "2 huevos", "--offline"]);
        assert!(cli.global.offline);
    }

    #[test]
    fn validate_keeps_hyphenated_values() {
        let cli = Cli::parse_from(["fitform", "validate", "age", "-5"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.value, "-5");
    }
}
