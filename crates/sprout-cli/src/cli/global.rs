//! Flags shared by every `sprout` subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more of what the pipeline does.
    ///
    /// `-v` shows each stage as it completes, `-vv` adds file-level detail
    /// (rewrites, deletions, git and package-manager commands), `-vvv`
    /// everything. `RUST_LOG` takes precedence.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Log pipeline progress (-v stages, -vv files, -vvv everything)"
    )]
    pub verbose: u8,

    /// Only print errors and requested data (JSON plans, config values).
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and requested data"
    )]
    pub quiet: bool,

    /// Plain, uncoloured output and spinners.
    ///
    /// Any non-empty `NO_COLOR` other than `0`/`false`/`no`/`off` turns it on.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Config file to read instead of the per-user default. Must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read defaults from FILE"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured status lines and a spinner per pipeline stage.
    Human,
    /// Status lines without colour or spinners.
    Plain,
    /// `new --dry-run` prints the resolved project plan and `config list`
    /// the effective configuration as JSON.
    Json,
}
