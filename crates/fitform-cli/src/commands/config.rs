//! `fitform config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const KEYS: [&str; 7] = [
    "locale",
    "api.base_url",
    "api.timeout_secs",
    "api.offline",
    "session.path",
    "output.no_color",
    "output.format",
];

pub fn execute(
    cmd: ConfigCommands,
    config: &AppConfig,
    offline: bool,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key, offline)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str, offline: bool) -> CliResult<String> {
    match key {
        "locale" => Ok(config.locale.to_string()),
        "api.base_url" => Ok(config.api.base_url.clone()),
        "api.timeout_secs" => Ok(config.api.timeout_secs.to_string()),
        "api.offline" => Ok(config.api.offline.to_string()),
        "session.path" => Ok(config
            .session_path(offline || config.api.offline)
            .display()
            .to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!(
                "Unknown config key: '{key}' (known keys: {})",
                KEYS.join(", ")
            ),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
