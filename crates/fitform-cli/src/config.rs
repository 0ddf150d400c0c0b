//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FITFORM_` prefix, `__` between sections,
//!    e.g. `FITFORM_API__BASE_URL`
//! 3. Config file (`--config` or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use fitform_adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use fitform_core::domain::Locale;

const ENV_PREFIX: &str = "FITFORM";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language of user-facing messages.
    #[serde(default)]
    pub locale: Locale,
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence.
    #[serde(default)]
    pub session: SessionConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Always use the built-in offline backend.
    #[serde(default)]
    pub offline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            offline: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `FITFORM_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("api.offline", defaults.api.offline)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .set_default("locale", defaults.locale.as_str())?
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(Self::environment())
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fitform.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("app", "fitform", "fitform")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fitform.toml"))
    }

    /// Where the session is persisted.
    ///
    /// The offline backend gets its own default file so its tokens never
    /// reach the real API.
    pub fn session_path(&self, offline: bool) -> PathBuf {
        if let Some(path) = &self.session.path {
            return path.clone();
        }
        let file = if offline {
            "session-offline.json"
        } else {
            "session.json"
        };
        directories::ProjectDirs::from("app", "fitform", "fitform")
            .map(|d| d.data_dir().join(file))
            .unwrap_or_else(|| Path::new(".fitform").join(file))
    }
}
