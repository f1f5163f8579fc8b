//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! the pipeline drives, not in the rules. Rule violations are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffold pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external tool (git, npm, yarn) failed or could not be started.
    #[error("{tool} failed: {reason}")]
    ExternalTool { tool: String, reason: String },

    /// Shared adapter state was poisoned by a panicking thread.
    #[error("adapter state lock poisoned")]
    LockPoisoned,

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn external(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The project may be partially generated; remove it and try again".into(),
            ],
            Self::ExternalTool { tool, .. } => vec![
                format!("Ensure '{}' is installed and in your PATH", tool),
                "Check the command output above for details".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ExternalTool { .. } => ErrorCategory::External,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
