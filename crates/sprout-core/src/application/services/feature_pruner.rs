//! Feature Pruner - removes a disabled feature from a provisioned tree.
//!
//! For a disabled toggle the pruner:
//! 1. Rewrites the compiler configuration to the reduced form
//! 2. Removes the feature's export lines from the entry module
//! 3. Deletes the feature's modules and their tests
//!
//! Both files are edited in memory before anything is written, so a drift
//! error leaves the tree as it was. Pruning is idempotent: an edit that is
//! already in place, or a module that is already gone, is skipped.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{DomainError, FeatureToggle, layout},
    error::SproutResult,
};

/// What a prune call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub compiler_config_changed: bool,
    pub exports_removed: usize,
    pub files_deleted: Vec<String>,
}

impl PruneOutcome {
    pub fn is_noop(&self) -> bool {
        !self.compiler_config_changed && self.exports_removed == 0 && self.files_deleted.is_empty()
    }
}

/// Applies [`FeatureToggle`] rules to a project tree.
pub struct FeaturePruner {
    filesystem: Arc<dyn Filesystem>,
}

impl FeaturePruner {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Remove the DOM typings feature unless `enabled`.
    pub fn prune_dom_feature(&self, project: &Path, enabled: bool) -> SproutResult<PruneOutcome> {
        self.prune(project, FeatureToggle::DomTypings, enabled)
    }

    /// Remove the runtime-platform typings feature unless `enabled`.
    pub fn prune_platform_feature(
        &self,
        project: &Path,
        enabled: bool,
    ) -> SproutResult<PruneOutcome> {
        self.prune(project, FeatureToggle::RuntimeTypings, enabled)
    }

    /// Remove `toggle` from the tree at `project` unless `enabled`.
    #[instrument(skip(self, project, toggle), fields(feature = %toggle))]
    pub fn prune(
        &self,
        project: &Path,
        toggle: FeatureToggle,
        enabled: bool,
    ) -> SproutResult<PruneOutcome> {
        if enabled {
            debug!("Feature enabled, nothing to prune");
            return Ok(PruneOutcome::default());
        }

        let rules = toggle.rules();
        let mut outcome = PruneOutcome::default();

        // 1. Plan the compiler configuration edit
        let config_path = project.join(layout::COMPILER_CONFIG);
        let mut compiler_config = self.filesystem.read_to_string(&config_path)?;
        for rewrite in rules.compiler_config {
            outcome.compiler_config_changed |=
                rewrite.apply_to(layout::COMPILER_CONFIG, &mut compiler_config)?;
        }

        // 2. Plan the entry module edit
        let entry_path = project.join(layout::ENTRY_MODULE);
        let mut entry = self.filesystem.read_to_string(&entry_path)?;
        for module in rules.modules {
            if entry.contains(module.export) {
                entry = entry.replacen(module.export, "", 1);
                outcome.exports_removed += 1;
            } else if self.filesystem.exists(&project.join(module.source)) {
                // The module is still there but nothing we know exports it.
                return Err(DomainError::TemplateDrift {
                    path: layout::ENTRY_MODULE.into(),
                    expected: module.export.into(),
                }
                .into());
            } else {
                debug!(export = module.export.trim_end(), "Export already removed");
            }
        }

        // 3. Apply
        if outcome.compiler_config_changed {
            self.filesystem.write_file(&config_path, &compiler_config)?;
        }
        if outcome.exports_removed > 0 {
            self.filesystem.write_file(&entry_path, &entry)?;
        }
        for file in rules.files() {
            let path = project.join(file);
            if self.filesystem.exists(&path) {
                self.filesystem.remove_file(&path)?;
                outcome.files_deleted.push(file.to_string());
            }
        }

        info!(
            compiler_config_changed = outcome.compiler_config_changed,
            exports_removed = outcome.exports_removed,
            files_deleted = outcome.files_deleted.len(),
            "Feature pruned"
        );
        Ok(outcome)
    }
}
