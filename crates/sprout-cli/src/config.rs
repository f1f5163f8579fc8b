//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SPROUT__SECTION__KEY`, e.g.
//!    `SPROUT__DEFAULTS__PACKAGE_MANAGER=yarn`
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use sprout_core::domain::PackageManager;
use tracing::debug;

/// Template cloned when neither `--template` nor `--template-dir` is given.
pub const DEFAULT_TEMPLATE_REPOSITORY: &str = "https://github.com/bitjson/typescript-starter.git";

const ENV_PREFIX: &str = "SPROUT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default answers for new projects.
    pub defaults: Defaults,
    /// Where the template comes from.
    pub template: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub github_user: Option<String>,
    pub package_manager: PackageManager,
    pub install: bool,
    pub editor_config: bool,
    pub dom: bool,
    pub runtime: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author_name: None,
            author_email: None,
            github_user: None,
            package_manager: PackageManager::Npm,
            install: true,
            editor_config: true,
            dom: false,
            runtime: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub repository: String,
    pub branch: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_TEMPLATE_REPOSITORY.into(),
            branch: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path, config_file.is_some())
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "Loading configuration");
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sprout.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("rs", "sprout", "sprout")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sprout.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_starter() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.package_manager, PackageManager::Npm);
        assert!(cfg.defaults.install);
        assert!(cfg.defaults.runtime);
        assert!(!cfg.defaults.dom);
        assert_eq!(cfg.template.repository, DEFAULT_TEMPLATE_REPOSITORY);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert!(cfg.defaults.editor_config);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprout.toml");
        std::fs::write(
            &path,
            "[defaults]\npackage_manager = \"yarn\"\ngithub_user = \"octo\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.package_manager, PackageManager::Yarn);
        assert_eq!(cfg.defaults.github_user.as_deref(), Some("octo"));
        assert!(cfg.defaults.install);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.template.repository, DEFAULT_TEMPLATE_REPOSITORY);
    }
}
