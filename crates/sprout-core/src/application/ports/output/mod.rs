//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprout-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{CommitMarker, Identity, PackageManager, TemplateSource};
use crate::error::SproutResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFilesystem` (production)
/// - `sprout_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Removing something that does not exist is an error; callers that
/// tolerate absence check [`Filesystem::exists`] first.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SproutResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> SproutResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Rename a file within the project.
    fn rename(&self, from: &Path, to: &Path) -> SproutResult<()>;
}

/// Result of materializing the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    /// Template revision the project was created from.
    pub commit: CommitMarker,
    /// Version-control metadata copied along with the template. The caller
    /// deletes it.
    pub history_dir: PathBuf,
}

/// Port for materializing the template at `working_dir/project_name`.
///
/// Implemented by:
/// - `sprout_adapters::GitProvisioner` (shallow clone)
/// - `sprout_adapters::DirectoryProvisioner` (copy of a local tree)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateProvisioner: Send + Sync {
    fn provision(
        &self,
        source: &TemplateSource,
        working_dir: &Path,
        project_name: &str,
    ) -> SproutResult<Provisioned>;
}

/// Port for installing the project's dependencies.
///
/// May take a long time; there is no timeout.
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    fn install(&self, package_manager: PackageManager, project: &Path) -> SproutResult<()>;
}

/// Port for recording the generated tree as the first commit.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    fn initial_commit(
        &self,
        commit: &CommitMarker,
        project: &Path,
        identity: &Identity,
    ) -> SproutResult<()>;
}

/// Port for progress reporting.
///
/// Purely observational: nothing the pipeline decides depends on it.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    /// A step began.
    fn start(&self, message: &str);

    /// The current step finished.
    fn succeed(&self, message: &str);

    /// The current step failed.
    fn fail(&self, message: &str);
}
