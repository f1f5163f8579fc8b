//! Diagnostic logging for `sprout`.
//!
//! Logs go to stderr so stdout stays clean for status lines and JSON. The
//! core and adapter crates only emit events (one per pipeline stage at INFO,
//! rewrites, deletions and spawned commands at DEBUG); this module is the
//! only place a subscriber is installed.
//!
//! Without `-v` only warnings show up, which in practice means a failed
//! best-effort cleanup. `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Log targets of the binary and the workspace crates it drives.
const TARGETS: [&str; 4] = ["sprout", "sprout_cli", "sprout_core", "sprout_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// `--quiet` wins over any number of `-v`.
fn level_for(args: &GlobalArgs) -> Level {
    if args.quiet {
        return Level::ERROR;
    }
    match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn directives(level: Level) -> String {
    TARGETS
        .map(|target| format!("{target}={level}"))
        .join(",")
}
