//! Scaffold Service - main application orchestrator.
//!
//! This service runs the whole pipeline against one project directory:
//! 1. Provision the template and drop its version-control history
//! 2. Derive and write the manifest, rewrite the ignore file
//! 3. Prune disabled features
//! 4. Finalize (cleanup, README, install, commit)
//!
//! Stages run strictly in order. There is no rollback: a failing stage
//! leaves the directory in whatever state the previous stages produced.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{
            Filesystem, PackageInstaller, ProgressReporter, TemplateProvisioner, VersionControl,
        },
        services::{FeaturePruner, Finalizer, PruneOutcome, reported},
    },
    domain::{
        AllowLists, CommitMarker, DomainValidator as validator, FeatureToggle, Manifest,
        ManifestTransform, PackageManager, ProjectConfig,
        features::{ALTERNATE_LOCKFILE_REWRITE, IGNORE_FILE_REWRITES},
        layout,
    },
    error::SproutResult,
};

/// Pipeline stages, in the order they complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Provisioned,
    ManifestWritten,
    Pruned,
    Finalized,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Provisioned => "provisioned",
            Self::ManifestWritten => "manifest written",
            Self::Pruned => "pruned",
            Self::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_path: PathBuf,
    pub commit: CommitMarker,
    pub stage: PipelineStage,
    pub pruned: Vec<(FeatureToggle, PruneOutcome)>,
    pub installed: bool,
    pub committed: bool,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    provisioner: Box<dyn TemplateProvisioner>,
    reporter: Arc<dyn ProgressReporter>,
    transform: ManifestTransform,
    pruner: FeaturePruner,
    finalizer: Finalizer,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use sprout_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Arc::new(filesystem), // impl Filesystem
    ///     Box::new(provisioner), // impl TemplateProvisioner
    ///     Arc::new(installer),  // impl PackageInstaller
    ///     Arc::new(vcs),        // impl VersionControl
    ///     Arc::new(reporter),   // impl ProgressReporter
    /// );
    /// ```
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        provisioner: Box<dyn TemplateProvisioner>,
        installer: Arc<dyn PackageInstaller>,
        vcs: Arc<dyn VersionControl>,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            pruner: FeaturePruner::new(Arc::clone(&filesystem)),
            finalizer: Finalizer::new(
                Arc::clone(&filesystem),
                installer,
                vcs,
                Arc::clone(&reporter),
            ),
            filesystem,
            provisioner,
            reporter,
            transform: ManifestTransform::default(),
        }
    }

    /// Replace the dependency allow-lists used by the manifest transform.
    pub fn with_allow_lists(mut self, allow: AllowLists) -> Self {
        self.transform = ManifestTransform::new(allow);
        self
    }

    /// Scaffold a new project.
    #[instrument(
        skip_all,
        fields(
            project = %config.project_name,
            template = %config.template,
        )
    )]
    pub fn scaffold(&self, config: &ProjectConfig) -> SproutResult<ScaffoldReport> {
        validator::validate_config(config)?;

        let project = config.project_path();
        if self.filesystem.exists(&project) {
            return Err(ApplicationError::ProjectExists { path: project }.into());
        }

        // 1. Provision
        let provisioned = reported(
            self.reporter.as_ref(),
            &format!("Cloning {}", config.template),
            || {
                self.provisioner.provision(
                    &config.template,
                    &config.working_directory,
                    config.project_name.as_str(),
                )
            },
        )?;
        if self.filesystem.exists(&provisioned.history_dir) {
            self.filesystem.remove_dir_all(&provisioned.history_dir)?;
        }
        info!(stage = %PipelineStage::Provisioned, commit = %provisioned.commit);

        // 2. Manifest + ignore file
        reported(self.reporter.as_ref(), "Updating package.json", || {
            self.write_manifest(&project, config)?;
            self.rewrite_ignore_file(&project, config.package_manager)
        })?;
        info!(stage = %PipelineStage::ManifestWritten);

        // 3. Feature pruning
        let pruned = reported(self.reporter.as_ref(), "Removing unused features", || {
            Ok(vec![
                (
                    FeatureToggle::DomTypings,
                    self.pruner
                        .prune_dom_feature(&project, config.include_dom_typings)?,
                ),
                (
                    FeatureToggle::RuntimeTypings,
                    self.pruner
                        .prune_platform_feature(&project, config.include_runtime_typings)?,
                ),
            ])
        })?;
        info!(stage = %PipelineStage::Pruned);

        // 4. Finalize
        let outcome = self
            .finalizer
            .finalize(&project, config, &provisioned.commit)?;
        info!(stage = %PipelineStage::Finalized, "Scaffold completed successfully");

        Ok(ScaffoldReport {
            project_path: project,
            commit: provisioned.commit,
            stage: PipelineStage::Finalized,
            pruned,
            installed: outcome.installed,
            committed: outcome.committed,
        })
    }

    /// Read the template manifest, derive the project's, write it back.
    ///
    /// Nothing is written unless the whole derivation succeeds.
    pub fn write_manifest(&self, project: &Path, config: &ProjectConfig) -> SproutResult<Manifest> {
        let path = project.join(layout::MANIFEST);
        let original = Manifest::parse(&self.filesystem.read_to_string(&path)?)?;
        let derived = self
            .transform
            .derive(&original, config, config.include_runtime_typings)?;
        self.filesystem
            .write_file(&path, &derived.to_pretty_string()?)?;
        debug!(path = %path.display(), "Manifest written");
        Ok(derived)
    }

    /// Drop template-only ignore rules and match the lockfile rule to the
    /// chosen package manager.
    pub fn rewrite_ignore_file(
        &self,
        project: &Path,
        package_manager: PackageManager,
    ) -> SproutResult<()> {
        let path = project.join(layout::IGNORE_FILE);
        let mut content = self.filesystem.read_to_string(&path)?;
        for rewrite in IGNORE_FILE_REWRITES {
            rewrite.apply_to(layout::IGNORE_FILE, &mut content)?;
        }
        if package_manager.is_alternate() {
            ALTERNATE_LOCKFILE_REWRITE.apply_to(layout::IGNORE_FILE, &mut content)?;
        }
        self.filesystem.write_file(&path, &content)?;
        debug!(path = %path.display(), "Ignore file rewritten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockPackageInstaller, MockProgressReporter, MockTemplateProvisioner,
        MockVersionControl,
    };
    use crate::domain::TemplateSource;
    use crate::error::SproutError;

    fn config() -> ProjectConfig {
        ProjectConfig::builder()
            .project_name("demo")
            .working_directory("/work")
            .template(TemplateSource::git("https://example.com/t.git"))
            .build()
            .unwrap()
    }

    fn service(fs: MockFilesystem, provisioner: MockTemplateProvisioner) -> ScaffoldService {
        ScaffoldService::new(
            Arc::new(fs),
            Box::new(provisioner),
            Arc::new(MockPackageInstaller::new()),
            Arc::new(MockVersionControl::new()),
            Arc::new(MockProgressReporter::new()),
        )
    }

    #[test]
    fn existing_project_directory_is_refused_before_provisioning() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p == Path::new("/work/demo"))
            .return_const(true);
        let mut provisioner = MockTemplateProvisioner::new();
        provisioner.expect_provision().never();

        let err = service(fs, provisioner).scaffold(&config()).unwrap_err();
        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn unparseable_manifest_is_never_written() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok(String::from("{ \"name\": ")));
        fs.expect_write_file().never();

        let svc = service(fs, MockTemplateProvisioner::new());
        let err = svc
            .write_manifest(Path::new("/work/demo"), &config())
            .unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(crate::domain::DomainError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn yarn_swaps_the_ignored_lockfile() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok(String::from("node_modules\nbuild\ndiff\nyarn.lock\n")));
        fs.expect_write_file()
            .withf(|_, content| content == "node_modules\nbuild\npackage-lock.json\n")
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(fs, MockTemplateProvisioner::new());
        svc.rewrite_ignore_file(Path::new("/work/demo"), PackageManager::Yarn)
            .unwrap();
    }

    #[test]
    fn npm_keeps_the_ignored_lockfile() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok(String::from("node_modules\ndiff\nyarn.lock\n")));
        fs.expect_write_file()
            .withf(|_, content| content == "node_modules\nyarn.lock\n")
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(fs, MockTemplateProvisioner::new());
        svc.rewrite_ignore_file(Path::new("/work/demo"), PackageManager::Npm)
            .unwrap();
    }

    #[test]
    fn stages_are_ordered() {
        assert!(PipelineStage::Provisioned < PipelineStage::ManifestWritten);
        assert!(PipelineStage::ManifestWritten < PipelineStage::Pruned);
        assert!(PipelineStage::Pruned < PipelineStage::Finalized);
    }
}
