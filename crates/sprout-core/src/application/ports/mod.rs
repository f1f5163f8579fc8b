//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprout-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations on the project tree
//!   - `TemplateProvisioner`: Materializes the template (git clone, local copy)
//!   - `PackageInstaller`: Runs the package manager
//!   - `VersionControl`: Creates the initial commit
//!   - `ProgressReporter`: Status side-channel (spinner, log)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Filesystem, PackageInstaller, ProgressReporter, Provisioned, TemplateProvisioner,
    VersionControl,
};

#[cfg(test)]
pub use output::{
    MockFilesystem, MockPackageInstaller, MockProgressReporter, MockTemplateProvisioner,
    MockVersionControl,
};
