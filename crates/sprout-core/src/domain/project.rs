//! The `ProjectConfig` aggregate and the value objects it is built from.
//!
//! A `ProjectConfig` is immutable for the duration of a scaffold run. The
//! builder validates the project name once, so every stage downstream can
//! use it as a path segment and a manifest `name` without re-checking.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Name placeholder shipped with the template's identity prompts.
pub const PLACEHOLDER_NAME: &str = "YOUR_NAME";
/// Email placeholder shipped with the template's identity prompts.
pub const PLACEHOLDER_EMAIL: &str = "YOUR_EMAIL";
/// GitHub user placeholder used when no username is known.
pub const PLACEHOLDER_GITHUB_USER: &str = "YOUR_GITHUB_USER_NAME";

const MAX_NAME_LEN: usize = 214;
const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

// ── ProjectName ───────────────────────────────────────────────────────────────

/// A package name that is safe both as a directory name and as the
/// manifest's `name` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(invalid("name cannot be longer than 214 characters"));
        }
        if name.trim() != name {
            return Err(invalid("name cannot have leading or trailing whitespace"));
        }
        if name.starts_with('.') || name.starts_with('_') {
            return Err(invalid("name cannot start with '.' or '_'"));
        }
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid("name must be lowercase"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(*c)))
        {
            return Err(DomainError::InvalidProjectName {
                name: name.clone(),
                reason: format!("'{c}' is not allowed in a package name"),
            });
        }
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(invalid("name is reserved"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── PackageManager ────────────────────────────────────────────────────────────

/// Which package manager the generated project is set up for.
///
/// `Npm` is the template's default; `Yarn` is the alternate choice and is
/// the only one that changes the ignore file and the script set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    pub const fn is_alternate(self) -> bool {
        matches!(self, Self::Yarn)
    }

    /// Name of the lockfile this package manager writes.
    pub const fn lockfile(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
        }
    }

    /// Command line that installs the project's dependencies.
    pub const fn install_args(self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["install"],
            Self::Yarn => &[],
        }
    }

    /// Command used by the `reset-hard` convenience script.
    pub fn reset_hard_command(self) -> String {
        let reinstall = match self {
            Self::Npm => "npm install",
            Self::Yarn => "yarn",
        };
        format!("git clean -dfx && git reset --hard && {reinstall}")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            _ => Err(DomainError::MissingRequiredField {
                field: "package manager (npm or yarn)",
            }),
        }
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

/// The author identity used for the initial commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub full_name: String,
    pub email: String,
}

impl Identity {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_NAME, PLACEHOLDER_EMAIL)
    }

    /// True only when *both* name and email differ from their placeholders.
    ///
    /// A half-configured identity suppresses the initial commit entirely.
    pub fn is_customized(&self) -> bool {
        self.full_name != PLACEHOLDER_NAME && self.email != PLACEHOLDER_EMAIL
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::placeholder()
    }
}

// ── TemplateSource ────────────────────────────────────────────────────────────

/// Where the template tree comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A git repository, optionally pinned to a branch or tag.
    Git {
        repository: String,
        branch: Option<String>,
    },
    /// A template tree already on disk.
    Directory(PathBuf),
}

impl TemplateSource {
    pub fn git(repository: impl Into<String>) -> Self {
        Self::Git {
            repository: repository.into(),
            branch: None,
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git {
                repository,
                branch: Some(branch),
            } => write!(f, "{repository}#{branch}"),
            Self::Git { repository, .. } => f.write_str(repository),
            Self::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

// ── CommitMarker ──────────────────────────────────────────────────────────────

/// Identifies the template revision a project was created from.
///
/// Opaque: only displayed and handed to the commit step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitMarker(String);

impl CommitMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display.
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for CommitMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ProjectConfig ─────────────────────────────────────────────────────────────

/// Everything a scaffold run needs to know, fixed before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub project_name: ProjectName,
    pub description: String,
    pub identity: Identity,
    pub github_username: String,
    pub include_dom_typings: bool,
    pub include_runtime_typings: bool,
    pub install_dependencies: bool,
    pub keep_editor_config: bool,
    pub package_manager: PackageManager,
    pub working_directory: PathBuf,
    pub template: TemplateSource,
}

impl ProjectConfig {
    pub fn builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::default()
    }

    /// Directory the project is materialized into.
    pub fn project_path(&self) -> PathBuf {
        self.working_directory.join(self.project_name.as_str())
    }

    /// Repository URL written into the manifest.
    pub fn repository_url(&self) -> String {
        format!(
            "https://github.com/{}/{}",
            self.github_username, self.project_name
        )
    }
}

/// Builder for [`ProjectConfig`].
///
/// Defaults mirror a non-interactive run: runtime typings on, DOM typings
/// off, install on, editor settings kept, npm, placeholder identity.
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    project_name: Option<String>,
    description: String,
    identity: Identity,
    github_username: String,
    include_dom_typings: bool,
    include_runtime_typings: bool,
    install_dependencies: bool,
    keep_editor_config: bool,
    package_manager: PackageManager,
    working_directory: PathBuf,
    template: Option<TemplateSource>,
}

impl Default for ProjectConfigBuilder {
    fn default() -> Self {
        Self {
            project_name: None,
            description: String::new(),
            identity: Identity::placeholder(),
            github_username: PLACEHOLDER_GITHUB_USER.into(),
            include_dom_typings: false,
            include_runtime_typings: true,
            install_dependencies: true,
            keep_editor_config: true,
            package_manager: PackageManager::Npm,
            working_directory: PathBuf::from("."),
            template: None,
        }
    }
}

impl ProjectConfigBuilder {
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn github_username(mut self, username: impl Into<String>) -> Self {
        self.github_username = username.into();
        self
    }

    pub fn dom_typings(mut self, include: bool) -> Self {
        self.include_dom_typings = include;
        self
    }

    pub fn runtime_typings(mut self, include: bool) -> Self {
        self.include_runtime_typings = include;
        self
    }

    pub fn install_dependencies(mut self, install: bool) -> Self {
        self.install_dependencies = install;
        self
    }

    pub fn keep_editor_config(mut self, keep: bool) -> Self {
        self.keep_editor_config = keep;
        self
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn working_directory(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_directory = dir.as_ref().to_path_buf();
        self
    }

    pub fn template(mut self, template: TemplateSource) -> Self {
        self.template = Some(template);
        self
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let name = self
            .project_name
            .ok_or(DomainError::MissingRequiredField {
                field: "project name",
            })?;
        let template = self.template.ok_or(DomainError::MissingRequiredField {
            field: "template source",
        })?;

        Ok(ProjectConfig {
            project_name: ProjectName::parse(name)?,
            description: self.description,
            identity: self.identity,
            github_username: self.github_username,
            include_dom_typings: self.include_dom_typings,
            include_runtime_typings: self.include_runtime_typings,
            install_dependencies: self.install_dependencies,
            keep_editor_config: self.keep_editor_config,
            package_manager: self.package_manager,
            working_directory: self.working_directory,
            template,
        })
    }
}
