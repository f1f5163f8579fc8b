//! Application services - orchestrate use cases.
//!
//! `ScaffoldService` runs the whole pipeline; `FeaturePruner` and
//! `Finalizer` are its later stages and are usable on their own against an
//! already provisioned tree.

pub mod feature_pruner;
pub mod finalizer;
pub mod scaffold_service;

pub use feature_pruner::{FeaturePruner, PruneOutcome};
pub use finalizer::{FinalizeOutcome, Finalizer, spawn_best_effort_removal};
pub use scaffold_service::{PipelineStage, ScaffoldReport, ScaffoldService};

use crate::{application::ports::ProgressReporter, error::SproutResult};

/// Run `step`, bracketing it with reporter calls.
///
/// The reporter only observes; the step's result is returned untouched.
pub(crate) fn reported<T>(
    reporter: &dyn ProgressReporter,
    message: &str,
    step: impl FnOnce() -> SproutResult<T>,
) -> SproutResult<T> {
    reporter.start(message);
    match step() {
        Ok(value) => {
            reporter.succeed(message);
            Ok(value)
        }
        Err(e) => {
            reporter.fail(&format!("{message}: {e}"));
            Err(e)
        }
    }
}
