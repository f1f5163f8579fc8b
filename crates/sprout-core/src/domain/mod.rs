// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Sprout.
//!
//! This module contains the pure rules of the scaffold: what the derived
//! manifest looks like, which edits each feature toggle implies, and which
//! files belong to the template rather than the project. All I/O is handled
//! via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Rule tables as data**: allow-lists and pruning rules are statics
//! - **Immutable inputs**: `ProjectConfig` is fixed for the run
pub mod error;
pub mod features;
pub mod layout;
pub mod manifest;
pub mod project;

mod validation;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use features::{FeatureRules, FeatureToggle, ModuleRule, RewriteOutcome, TextRewrite};
pub use manifest::{AllowLists, Manifest, ManifestTransform, derive_manifest};
pub use project::{
    CommitMarker, Identity, PackageManager, ProjectConfig, ProjectConfigBuilder, ProjectName,
    TemplateSource,
};
pub use validation::DomainValidator;
