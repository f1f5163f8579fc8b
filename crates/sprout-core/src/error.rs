//! Unified error handling for Sprout Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Sprout Core operations.
#[derive(Debug, Error, Clone)]
pub enum SproutError {
    /// Errors from the domain layer (rule violations, template drift).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, external tools).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SproutError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Sprout".into(),
                "Please report this issue at: https://github.com/sprout-rs/sprout/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Integrity => ErrorCategory::Integrity,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    /// The template no longer matches the rules applied to it.
    Integrity,
    /// A collaborator process (git, package manager) failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type SproutResult<T> = Result<T, SproutError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> SproutResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> SproutResult<T> {
        self.map_err(|e| SproutError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
