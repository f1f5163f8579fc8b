//! Application layer for Sprout.
//!
//! This layer contains:
//! - **Services**: Pipeline orchestration (ScaffoldService, FeaturePruner, Finalizer)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rules itself. Rule tables and the manifest transform live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    FeaturePruner, FinalizeOutcome, Finalizer, PipelineStage, PruneOutcome, ScaffoldReport,
    ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Filesystem, PackageInstaller, ProgressReporter, Provisioned, TemplateProvisioner,
    VersionControl,
};

pub use error::ApplicationError;
