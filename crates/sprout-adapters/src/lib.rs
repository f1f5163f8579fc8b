//! Infrastructure adapters for Sprout.
//!
//! This crate implements the ports defined in `sprout-core::application::ports`.
//! It contains all external process calls and I/O operations.

pub mod directory;
pub mod filesystem;
pub mod git;
pub mod installer;
mod process;
pub mod reporter;

// Re-export commonly used adapters
pub use directory::DirectoryProvisioner;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::{GitCommitter, GitIdentity, GitProvisioner};
pub use installer::CommandInstaller;
pub use reporter::TracingReporter;

use sprout_core::{application::ports::TemplateProvisioner, domain::TemplateSource};

/// Pick the provisioner that understands `source`.
pub fn provisioner_for(source: &TemplateSource) -> Box<dyn TemplateProvisioner> {
    match source {
        TemplateSource::Git { .. } => Box::new(GitProvisioner::new()),
        TemplateSource::Directory(_) => Box::new(DirectoryProvisioner::new()),
    }
}
