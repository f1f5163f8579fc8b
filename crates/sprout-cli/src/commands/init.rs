//! `sprout init`: write a configuration file holding the built-in defaults.

use std::path::Path;

use tracing::info;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = AppConfig::config_path();
    if !write_default_config(&path, args.force)? {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

/// Write the default config to `path`. Returns `false` if a file was
/// already there and `force` is not set.
pub fn write_default_config(path: &Path, force: bool) -> CliResult<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .with_cli_context(|| "Failed to serialise default config")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    info!(path = %path.display(), "Configuration written");
    Ok(true)
}
