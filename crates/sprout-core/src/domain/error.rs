// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the pipeline reports them after the fact)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid package manifest: {reason}")]
    InvalidManifest { reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Template Integrity Errors
    // ========================================================================
    /// An edit expected a fragment the template no longer contains.
    #[error("template drift in {path}: expected to find {expected:?}")]
    TemplateDrift { path: String, expected: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("'{}' cannot be used as a package name: {}", name, reason),
                "Use lowercase letters, digits, '-', '.', '_' or '~'".into(),
                "Examples: my-lib, typed-utils, parser2".into(),
            ],
            Self::InvalidManifest { reason } => vec![
                format!("package.json could not be processed: {}", reason),
                "Check that the template's package.json is valid JSON".into(),
            ],
            Self::TemplateDrift { path, expected } => vec![
                format!("{} no longer contains {:?}", path, expected),
                "The template has changed since this version of sprout was released".into(),
                "Pin a known-good template with --branch, or upgrade sprout".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{}'", field),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidManifest { .. } | Self::TemplateDrift { .. } => ErrorCategory::Integrity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Integrity,
}
