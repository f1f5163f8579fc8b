//! Provisioning from a template tree already on disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use sprout_core::{
    application::{
        ApplicationError,
        ports::{Provisioned, TemplateProvisioner},
    },
    domain::{CommitMarker, TemplateSource, layout},
    error::{Context, SproutError, SproutResult},
};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::{filesystem::map_io_error, git::capture_head_sha, process::run};

/// Marker used when the template directory is not a git checkout.
pub const LOCAL_MARKER: &str = "local";

/// Copies a local template directory into place.
///
/// The source's `.git` directory is never copied, so the reported history
/// directory usually does not exist; the pipeline tolerates that.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryProvisioner;

impl DirectoryProvisioner {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateProvisioner for DirectoryProvisioner {
    #[instrument(skip(self, source), fields(source = %source))]
    fn provision(
        &self,
        source: &TemplateSource,
        working_dir: &Path,
        project_name: &str,
    ) -> SproutResult<Provisioned> {
        let TemplateSource::Directory(root) = source else {
            return Err(SproutError::Internal {
                message: format!("directory provisioner cannot copy {source}"),
            });
        };
        if !root.is_dir() {
            return Err(
                ApplicationError::filesystem(root, "Template directory does not exist").into(),
            );
        }

        let project = working_dir.join(project_name);
        if resolve(&project).starts_with(resolve(root)) {
            return Err(ApplicationError::filesystem(
                &project,
                "Project directory is inside the template directory",
            )
            .into());
        }
        let copied = copy_tree(root, &project)?;

        let commit = template_revision(root);
        info!(files = copied, commit = %commit.short(), "Template copied");

        Ok(Provisioned {
            commit,
            history_dir: project.join(layout::HISTORY_DIR),
        })
    }
}

/// HEAD of `root` when `root` is itself a repository's top level. A
/// template nested in some other checkout gets [`LOCAL_MARKER`].
fn template_revision(root: &Path) -> CommitMarker {
    let is_top_level = run("git", &["rev-parse", "--show-toplevel"], root)
        .is_ok_and(|top| resolve(Path::new(&top)) == resolve(root));
    if !is_top_level {
        return CommitMarker::new(LOCAL_MARKER);
    }
    capture_head_sha(root)
        .map(CommitMarker::new)
        .unwrap_or_else(|_| CommitMarker::new(LOCAL_MARKER))
}

/// Absolute, symlink-free form of `path`. The missing tail of a path that
/// does not exist yet is appended to its nearest existing ancestor.
fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute
        .ancestors()
        .find_map(|ancestor| {
            let base = ancestor.canonicalize().ok()?;
            let rest = absolute.strip_prefix(ancestor).ok()?;
            Some(base.join(rest))
        })
        .unwrap_or(absolute)
}

/// Copy every file and directory under `from` into `to`, skipping version
/// control metadata. Returns the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> SproutResult<usize> {
    std::fs::create_dir_all(to).map_err(|e| map_io_error(to, e, "create directory"))?;

    let mut copied = 0;
    let walker = WalkDir::new(from)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.file_name() != OsStr::new(layout::HISTORY_DIR));

    for entry in walker {
        let entry = entry.map_err(|e| {
            ApplicationError::filesystem(from, format!("directory walk error: {e}"))
        })?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .context(format!("relativising '{}'", entry.path().display()))?;
        let target = to.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| map_io_error(&target, e, "create directory"))?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &target)
                .map_err(|e| map_io_error(&target, e, "copy file"))?;
            copied += 1;
        } else {
            debug!(path = %rel.display(), "Skipping special file");
        }
    }
    Ok(copied)
}
