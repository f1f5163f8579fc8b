//! Git adapters: template cloning, the initial commit, identity lookup.

use std::path::Path;

use sprout_core::{
    application::{
        ApplicationError,
        ports::{Provisioned, TemplateProvisioner, VersionControl},
    },
    domain::{CommitMarker, Identity, TemplateSource, layout},
    error::{SproutError, SproutResult},
};
use tracing::{info, instrument};

use crate::process::run;

const GIT: &str = "git";

/// Shallow-clones a git template.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitProvisioner;

impl GitProvisioner {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateProvisioner for GitProvisioner {
    #[instrument(skip(self, source), fields(source = %source))]
    fn provision(
        &self,
        source: &TemplateSource,
        working_dir: &Path,
        project_name: &str,
    ) -> SproutResult<Provisioned> {
        let TemplateSource::Git { repository, branch } = source else {
            return Err(SproutError::Internal {
                message: format!("git provisioner cannot fetch {source}"),
            });
        };

        let mut args = vec!["clone", "--depth=1"];
        if let Some(branch) = branch {
            args.extend(["--branch", branch.as_str()]);
        }
        args.extend([repository.as_str(), project_name]);
        run(GIT, &args, working_dir)?;

        let project = working_dir.join(project_name);
        let commit = CommitMarker::new(capture_head_sha(&project)?);
        info!(commit = %commit.short(), "Template cloned");

        Ok(Provisioned {
            commit,
            history_dir: project.join(layout::HISTORY_DIR),
        })
    }
}

/// Capture the HEAD commit SHA of the repository at `repo_dir`.
pub fn capture_head_sha(repo_dir: &Path) -> SproutResult<String> {
    let sha = run(GIT, &["rev-parse", "HEAD"], repo_dir)?;
    if sha.is_empty() {
        return Err(ApplicationError::external(GIT, "rev-parse HEAD returned empty output").into());
    }
    Ok(sha)
}

/// Records the generated tree as a fresh repository's first commit.
#[derive(Debug, Clone)]
pub struct GitCommitter {
    template: String,
}

impl GitCommitter {
    /// `template` names the template in the commit message.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn message(&self, commit: &CommitMarker) -> String {
        format!("Initial commit\n\nCreated from {}@{}", self.template, commit)
    }
}

impl VersionControl for GitCommitter {
    #[instrument(skip_all, fields(project = %project.display()))]
    fn initial_commit(
        &self,
        commit: &CommitMarker,
        project: &Path,
        identity: &Identity,
    ) -> SproutResult<()> {
        let name = format!("user.name={}", identity.full_name);
        let email = format!("user.email={}", identity.email);
        let message = self.message(commit);

        run(GIT, &["init"], project)?;
        run(GIT, &["add", "-A"], project)?;
        run(
            GIT,
            &["-c", &name, "-c", &email, "commit", "-m", &message],
            project,
        )?;
        info!("Initial commit created");
        Ok(())
    }
}

/// Prompt defaults from the user's git configuration.
pub struct GitIdentity;

impl GitIdentity {
    /// Read `user.name` and `user.email`, keeping the placeholder for any
    /// value git does not have.
    pub fn detect() -> Identity {
        let placeholder = Identity::placeholder();
        Identity {
            full_name: config_value("user.name").unwrap_or(placeholder.full_name),
            email: config_value("user.email").unwrap_or(placeholder.email),
        }
    }

    /// The `github.user` setting, if any.
    pub fn github_user() -> Option<String> {
        config_value("github.user")
    }
}

fn config_value(key: &str) -> Option<String> {
    run(GIT, &["config", "--get", key], Path::new("."))
        .ok()
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        run(GIT, args, repo_dir).unwrap();
    }

    fn make_git_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["commit", "--allow-empty", "-m", "initial"]);
        dir
    }

    #[test]
    fn capture_head_sha_returns_40_hex_chars() {
        let repo = make_git_repo();
        let sha = capture_head_sha(repo.path()).unwrap();
        assert_eq!(sha.len(), 40, "SHA should be 40 hex chars, got: {sha}");
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn capture_head_sha_fails_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(capture_head_sha(dir.path()).is_err());
    }

    #[test]
    fn commit_message_names_template_and_revision() {
        let committer = GitCommitter::new("typescript-starter");
        assert_eq!(
            committer.message(&CommitMarker::new("abc1234")),
            "Initial commit\n\nCreated from typescript-starter@abc1234"
        );
    }

    #[test]
    fn initial_commit_uses_the_given_identity() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# demo\n").unwrap();

        GitCommitter::new("starter")
            .initial_commit(
                &CommitMarker::new("abc"),
                dir.path(),
                &Identity::new("Ada Lovelace", "ada@example.com"),
            )
            .unwrap();

        let author = run(GIT, &["log", "-1", "--format=%an <%ae>"], dir.path()).unwrap();
        assert_eq!(author, "Ada Lovelace <ada@example.com>");
    }

    #[test]
    fn provisioner_rejects_directory_sources() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitProvisioner::new()
            .provision(&TemplateSource::Directory(dir.path().into()), dir.path(), "demo")
            .unwrap_err();
        assert!(matches!(err, SproutError::Internal { .. }));
    }
}
