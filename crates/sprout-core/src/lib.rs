//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! TypeScript project generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! │     (Collects ProjectConfig)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, Pruner, Finalizer)   │
//! │        Orchestrates the pipeline        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Provisioner, Installer...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sprout-adapters (Infrastructure)    │
//! │  (LocalFilesystem, GitProvisioner, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Manifest, FeatureToggle, ProjectConfig)│
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sprout_core::prelude::*;
//!
//! let config = ProjectConfig::builder()
//!     .project_name("demo")
//!     .description("A demo library")
//!     .template(TemplateSource::git("https://github.com/bitjson/typescript-starter.git"))
//!     .build()?;
//!
//! let service = ScaffoldService::new(fs, provisioner, installer, vcs, reporter);
//! let report = service.scaffold(&config)?;
//! println!("Created {}", report.project_path.display());
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Commonly used types.
pub mod prelude {
    pub use crate::application::{
        ApplicationError, Filesystem, PackageInstaller, ProgressReporter, ScaffoldReport,
        ScaffoldService, TemplateProvisioner, VersionControl,
    };
    pub use crate::domain::{
        DomainError, FeatureToggle, Identity, PackageManager, ProjectConfig, ProjectName,
        TemplateSource,
    };
    pub use crate::error::{SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
