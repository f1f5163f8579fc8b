//! Terminal output for `sprout` commands.
//!
//! Two kinds of output go to stdout. Status lines (success, warning, info,
//! headers) narrate a run and disappear under `--quiet`. Data (config values,
//! JSON plans) is what the user asked for and is always written.
//! Errors are rendered by `main` on stderr.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const SUCCESS: &str = "\u{2713}"; // ✓
const WARNING: &str = "\u{26a0}"; // ⚠
const INFO: &str = "\u{2139}"; // ℹ

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Unstyled status text, e.g. the configuration summary and next steps.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Requested data; written even under `--quiet`.
    pub fn data(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }

    /// Pretty-printed JSON data.
    pub fn json<T: serde::Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.data(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(SUCCESS, Style::new().green(), msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(WARNING, Style::new().yellow(), msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(INFO, Style::new().blue(), msg)
    }

    /// Section title, e.g. above the configuration summary.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.styled(text, Style::new().cyan().bold()))
    }

    /// Whether status lines carry ANSI colour.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// Whether pipeline stages get a live spinner instead of log lines.
    pub fn is_interactive(&self) -> bool {
        !self.quiet && self.resolved_format == OutputFormat::Human && self.term.is_term()
    }

    /// `Human`, `Plain` or `Json`; never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn status(&self, symbol: &str, style: Style, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = format!(
            "{} {}",
            self.styled(symbol, style.bold()),
            self.styled(msg, style)
        );
        self.term.write_line(&line)
    }

    fn styled(&self, text: &str, style: Style) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.style(style).to_string()
        }
    }
}
