//! Running external programs (git, npm, yarn).

use std::io;
use std::path::Path;
use std::process::Command;

use sprout_core::{application::ApplicationError, error::SproutError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub(crate) enum ProcessError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program} {args}` exited with {status}: {stderr}")]
    Status {
        program: String,
        args: String,
        status: String,
        stderr: String,
    },
}

impl ProcessError {
    fn program(&self) -> &str {
        match self {
            Self::Spawn { program, .. } | Self::Status { program, .. } => program,
        }
    }
}

impl From<ProcessError> for SproutError {
    fn from(e: ProcessError) -> Self {
        ApplicationError::external(e.program(), e.to_string()).into()
    }
}

/// Run `program args...` in `dir` and return its trimmed stdout.
///
/// A non-zero exit is an error carrying the program's stderr.
pub(crate) fn run(program: &str, args: &[&str], dir: &Path) -> Result<String, ProcessError> {
    debug!(program, ?args, dir = %dir.display(), "Running");
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ProcessError::Status {
            program: program.to_string(),
            args: args.join(" "),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
