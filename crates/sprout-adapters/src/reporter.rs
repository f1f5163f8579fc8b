//! Progress reporting through `tracing`, for non-interactive runs.

use sprout_core::application::ports::ProgressReporter;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn start(&self, message: &str) {
        info!("{message}...");
    }

    fn succeed(&self, message: &str) {
        info!("{message}: done");
    }

    fn fail(&self, message: &str) {
        error!("{message}");
    }
}
