//! `sprout config`: inspect the effective configuration.

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                let serialised = toml::to_string_pretty(&config)
                    .with_cli_context(|| "Failed to serialise config")?;
                output.data(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let d = &config.defaults;
    let optional = |v: &Option<String>| v.clone().unwrap_or_default();
    match key {
        "defaults.author_name" => Ok(optional(&d.author_name)),
        "defaults.author_email" => Ok(optional(&d.author_email)),
        "defaults.github_user" => Ok(optional(&d.github_user)),
        "defaults.package_manager" => Ok(d.package_manager.to_string()),
        "defaults.install" => Ok(d.install.to_string()),
        "defaults.editor_config" => Ok(d.editor_config.to_string()),
        "defaults.dom" => Ok(d.dom.to_string()),
        "defaults.runtime" => Ok(d.runtime.to_string()),
        "template.repository" => Ok(config.template.repository.clone()),
        "template.branch" => Ok(optional(&config.template.branch)),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
