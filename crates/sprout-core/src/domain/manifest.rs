//! Package manifest model and the pure transform applied to it.
//!
//! The manifest is kept as an ordered JSON object so that keys the transform
//! does not touch keep their position and value byte-for-byte. Keys the
//! transform introduces are appended after the inherited ones, in a fixed
//! order, which keeps the written file stable across runs.
//!
//! # Domain purity
//!
//! Everything here is pure: the caller reads the file, calls
//! [`ManifestTransform::derive`], and writes the result.

use serde_json::{Map, Value};

use crate::domain::{error::DomainError, project::ProjectConfig};

pub const DEPENDENCIES: &str = "dependencies";
pub const DEV_DEPENDENCIES: &str = "devDependencies";
pub const SCRIPTS: &str = "scripts";
pub const TEST_RUNNER: &str = "ava";

/// Version every generated project starts at.
pub const INITIAL_VERSION: &str = "1.0.0";

/// Top-level keys that only make sense inside the template repository.
pub const SCAFFOLD_ONLY_KEYS: &[&str] = &["bin", "NOTE", "NOTE_2"];

/// Test files matching this glob are compiled output and must not be run.
pub const BUILD_OUTPUT_EXCLUSION: &str = "!build/module/**";

const WATCHER_IGNORE: &str = "ignoredByWatcher";
const TEST_FILES: &str = "files";

/// Development dependencies a generated project keeps.
pub const KEPT_DEV_DEPENDENCIES: &[&str] = &[
    "@ava/typescript",
    "@istanbuljs/nyc-config-typescript",
    "@typescript-eslint/eslint-plugin",
    "@typescript-eslint/parser",
    "ava",
    "codecov",
    "cspell",
    "cz-conventional-changelog",
    "eslint",
    "eslint-config-prettier",
    "eslint-plugin-eslint-comments",
    "eslint-plugin-import",
    "gh-pages",
    "npm-run-all",
    "nyc",
    "open-cli",
    "prettier",
    "standard-version",
    "ts-node",
    "typedoc",
    "typescript",
];

/// Runtime dependencies a generated project keeps.
pub const KEPT_DEPENDENCIES: &[&str] = &[];

// ── Manifest ──────────────────────────────────────────────────────────────────

/// An ordered `package.json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    /// Parse manifest text. The top-level value must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidManifest {
                reason: format!("expected a JSON object at the top level, found {}", kind(&other)),
            }),
        }
    }

    /// Serialize with 2-space indentation and a trailing newline, the way
    /// npm writes `package.json`.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut out =
            serde_json::to_string_pretty(&self.0).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;
        out.push('\n');
        Ok(out)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// An object-valued section, `None` when absent.
    fn section(&self, key: &str) -> Result<Option<&Map<String, Value>>, DomainError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(DomainError::InvalidManifest {
                reason: format!("'{key}' must be an object, found {}", kind(other)),
            }),
        }
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ── Allow-lists ───────────────────────────────────────────────────────────────

/// Which dependency names survive the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowLists {
    pub dev_dependencies: &'static [&'static str],
    pub dependencies: &'static [&'static str],
}

impl AllowLists {
    pub const DEFAULT: Self = Self {
        dev_dependencies: KEPT_DEV_DEPENDENCIES,
        dependencies: KEPT_DEPENDENCIES,
    };
}

impl Default for AllowLists {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ── Transform ─────────────────────────────────────────────────────────────────

/// Derives a project manifest from the template's manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestTransform {
    allow: AllowLists,
}

impl ManifestTransform {
    pub const fn new(allow: AllowLists) -> Self {
        Self { allow }
    }

    pub const fn allow_lists(&self) -> &AllowLists {
        &self.allow
    }

    /// Derive the project manifest.
    ///
    /// When `include_runtime_deps` is false the runtime dependency map is
    /// emptied regardless of the allow-list.
    pub fn derive(
        &self,
        original: &Manifest,
        config: &ProjectConfig,
        include_runtime_deps: bool,
    ) -> Result<Manifest, DomainError> {
        let dependencies = if include_runtime_deps {
            keep_only(original.section(DEPENDENCIES)?, self.allow.dependencies)
        } else {
            Map::new()
        };
        let dev_dependencies =
            keep_only(original.section(DEV_DEPENDENCIES)?, self.allow.dev_dependencies);
        let scripts = derive_scripts(original.section(SCRIPTS)?, config);
        let test_runner = derive_test_runner(original.section(TEST_RUNNER)?);

        let mut map = original.0.clone();
        map.insert(DEPENDENCIES.into(), Value::Object(dependencies));
        map.insert("description".into(), config.description.clone().into());
        map.insert(DEV_DEPENDENCIES.into(), Value::Object(dev_dependencies));
        map.insert("keywords".into(), Value::Array(Vec::new()));
        map.insert("name".into(), config.project_name.as_str().into());
        map.insert("repository".into(), config.repository_url().into());
        map.insert(SCRIPTS.into(), Value::Object(scripts));
        map.insert("version".into(), INITIAL_VERSION.into());
        map.insert(TEST_RUNNER.into(), Value::Object(test_runner));

        for key in SCAFFOLD_ONLY_KEYS {
            map.shift_remove(*key);
        }

        Ok(Manifest(map))
    }
}

/// Derive a manifest using the default allow-lists.
pub fn derive_manifest(
    original: &Manifest,
    config: &ProjectConfig,
    include_runtime_deps: bool,
) -> Result<Manifest, DomainError> {
    ManifestTransform::default().derive(original, config, include_runtime_deps)
}

/// Allow-listed entries of `from`, in allow-list order. Names missing
/// upstream are left out rather than written as `null`.
fn keep_only(from: Option<&Map<String, Value>>, allow: &[&str]) -> Map<String, Value> {
    let Some(from) = from else {
        return Map::new();
    };
    allow
        .iter()
        .filter_map(|name| from.get(*name).map(|v| ((*name).to_string(), v.clone())))
        .collect()
}

fn derive_scripts(
    inherited: Option<&Map<String, Value>>,
    config: &ProjectConfig,
) -> Map<String, Value> {
    let mut scripts = inherited.cloned().unwrap_or_default();
    if config.package_manager.is_alternate() {
        scripts.insert(
            "reset-hard".into(),
            config.package_manager.reset_hard_command().into(),
        );
    }
    scripts.insert("version".into(), version_script(config.project_name.as_str()).into());
    scripts
}

/// Release script, tagged with the project name in the release commit.
pub fn version_script(project_name: &str) -> String {
    format!("standard-version -m \"chore(release): {project_name}@%s\"")
}

fn derive_test_runner(inherited: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut runner = inherited.cloned().unwrap_or_default();
    runner.insert(
        TEST_FILES.into(),
        Value::Array(vec![BUILD_OUTPUT_EXCLUSION.into()]),
    );
    runner.shift_remove(WATCHER_IGNORE);
    runner
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
