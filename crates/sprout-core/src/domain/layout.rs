//! Paths of the fixed template layout, relative to the project root.

pub const MANIFEST: &str = "package.json";
pub const IGNORE_FILE: &str = ".gitignore";
pub const COMPILER_CONFIG: &str = "tsconfig.json";
pub const ENTRY_MODULE: &str = "src/index.ts";

pub const README: &str = "README.md";
pub const README_STARTER: &str = "README-starter.md";
pub const CHANGELOG: &str = "CHANGELOG.md";
pub const NPM_LOCKFILE: &str = "package-lock.json";

pub const BIN_DIR: &str = "bin";
pub const CLI_DIR: &str = "src/cli";
pub const EDITOR_DIR: &str = ".vscode";
pub const HISTORY_DIR: &str = ".git";

/// Files that only exist to develop the template itself.
pub const SCAFFOLD_ONLY_FILES: &[&str] = &[CHANGELOG, README, NPM_LOCKFILE];

/// Directories that only exist to develop the template itself.
pub const SCAFFOLD_ONLY_DIRS: &[&str] = &[BIN_DIR, CLI_DIR];

/// Placeholder in the starter README replaced by the project name.
pub const NAME_PLACEHOLDER: &str = "[package-name]";
/// Placeholder in the starter README replaced by the description.
pub const DESCRIPTION_PLACEHOLDER: &str = "[description]";
