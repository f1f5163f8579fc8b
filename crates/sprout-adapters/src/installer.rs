//! Package manager adapter.

use std::path::Path;

use sprout_core::{
    application::ports::PackageInstaller, domain::PackageManager, error::SproutResult,
};
use tracing::{info, instrument};

use crate::process::run;

/// Runs `npm install` or `yarn` in the project directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInstaller;

impl CommandInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl PackageInstaller for CommandInstaller {
    #[instrument(skip(self, project), fields(package_manager = %package_manager))]
    fn install(&self, package_manager: PackageManager, project: &Path) -> SproutResult<()> {
        run(
            package_manager.as_str(),
            package_manager.install_args(),
            project,
        )?;
        info!("Dependencies installed");
        Ok(())
    }
}
