//! Finalizer - turns a pruned template tree into the user's project.
//!
//! 1. Delete files and directories that only serve the template itself
//! 2. Drop editor settings if the user opted out (background, best effort)
//! 3. Promote the starter README and fill in its placeholders
//! 4. Install dependencies (optional)
//! 5. Create the initial commit when the identity is fully customized
//!
//! The editor-settings removal overlaps steps 3 and 4. Its result is never
//! inspected, but it has finished before the commit and before `finalize`
//! returns, so it can neither leak into the commit nor be cut off at exit.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, PackageInstaller, ProgressReporter, VersionControl},
        services::reported,
    },
    domain::{CommitMarker, DomainError, ProjectConfig, layout},
    error::SproutResult,
};

/// What finalization did beyond the unconditional steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeOutcome {
    pub installed: bool,
    pub committed: bool,
}

/// Last stage of the scaffold pipeline.
pub struct Finalizer {
    filesystem: Arc<dyn Filesystem>,
    installer: Arc<dyn PackageInstaller>,
    vcs: Arc<dyn VersionControl>,
    reporter: Arc<dyn ProgressReporter>,
}

impl Finalizer {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        installer: Arc<dyn PackageInstaller>,
        vcs: Arc<dyn VersionControl>,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            filesystem,
            installer,
            vcs,
            reporter,
        }
    }

    #[instrument(skip_all, fields(project = %project.display(), commit = %commit.short()))]
    pub fn finalize(
        &self,
        project: &Path,
        config: &ProjectConfig,
        commit: &CommitMarker,
    ) -> SproutResult<FinalizeOutcome> {
        self.remove_scaffold_artifacts(project)?;

        let editor_cleanup = BackgroundTask::new((!config.keep_editor_config).then(|| {
            spawn_best_effort_removal(
                Arc::clone(&self.filesystem),
                project.join(layout::EDITOR_DIR),
            )
        }));

        self.promote_readme(project, config)?;

        let installed = self.install_dependencies(project, config)?;
        editor_cleanup.wait();
        let committed = self.commit_if_identified(project, config, commit)?;

        info!(installed, committed, "Project finalized");
        Ok(FinalizeOutcome {
            installed,
            committed,
        })
    }

    /// Delete the changelog, original README, lockfile, bin and CLI sources.
    pub fn remove_scaffold_artifacts(&self, project: &Path) -> SproutResult<()> {
        for file in layout::SCAFFOLD_ONLY_FILES {
            self.filesystem.remove_file(&project.join(file))?;
        }
        for dir in layout::SCAFFOLD_ONLY_DIRS {
            self.filesystem.remove_dir_all(&project.join(dir))?;
        }
        debug!("Scaffold-only files removed");
        Ok(())
    }

    /// Rename the starter README into place and substitute its placeholders.
    pub fn promote_readme(&self, project: &Path, config: &ProjectConfig) -> SproutResult<()> {
        let readme = project.join(layout::README);
        self.filesystem
            .rename(&project.join(layout::README_STARTER), &readme)?;

        let mut content = self.filesystem.read_to_string(&readme)?;
        for (placeholder, value) in [
            (layout::NAME_PLACEHOLDER, config.project_name.as_str()),
            (layout::DESCRIPTION_PLACEHOLDER, config.description.as_str()),
        ] {
            if !content.contains(placeholder) {
                return Err(DomainError::TemplateDrift {
                    path: layout::README.into(),
                    expected: placeholder.into(),
                }
                .into());
            }
            content = content.replacen(placeholder, value, 1);
        }
        self.filesystem.write_file(&readme, &content)?;
        debug!("README promoted");
        Ok(())
    }

    /// Run the package manager if the user asked for it.
    pub fn install_dependencies(
        &self,
        project: &Path,
        config: &ProjectConfig,
    ) -> SproutResult<bool> {
        if !config.install_dependencies {
            debug!("Dependency installation skipped");
            return Ok(false);
        }
        let pm = config.package_manager;
        reported(
            self.reporter.as_ref(),
            &format!("Installing dependencies with {pm}"),
            || self.installer.install(pm, project),
        )?;
        Ok(true)
    }

    /// Commit the tree, but only when both name and email were customized.
    pub fn commit_if_identified(
        &self,
        project: &Path,
        config: &ProjectConfig,
        commit: &CommitMarker,
    ) -> SproutResult<bool> {
        if !config.identity.is_customized() {
            info!("Identity not configured, skipping initial commit");
            return Ok(false);
        }
        reported(self.reporter.as_ref(), "Creating initial commit", || {
            self.vcs.initial_commit(commit, project, &config.identity)
        })?;
        Ok(true)
    }
}

/// Remove `path` on a background thread, logging instead of failing.
pub fn spawn_best_effort_removal(filesystem: Arc<dyn Filesystem>, path: PathBuf) -> JoinHandle<()> {
    thread::spawn(move || {
        if !filesystem.exists(&path) {
            return;
        }
        match filesystem.remove_dir_all(&path) {
            Ok(()) => debug!(path = %path.display(), "Removed"),
            Err(e) => warn!(path = %path.display(), error = %e, "Best-effort removal failed"),
        }
    })
}

/// A best-effort background step. Waited for when dropped, so an early
/// return from `finalize` does not abandon it.
struct BackgroundTask(Option<JoinHandle<()>>);

impl BackgroundTask {
    fn new(handle: Option<JoinHandle<()>>) -> Self {
        Self(handle)
    }

    fn wait(mut self) {
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.0.take() {
            if handle.join().is_err() {
                warn!("Background cleanup panicked");
            }
        }
    }
}

impl Drop for BackgroundTask {
    fn drop(&mut self) {
        self.join();
    }
}
