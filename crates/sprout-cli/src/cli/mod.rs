//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Start a TypeScript library from a starter template",
    long_about = "Sprout clones a TypeScript starter, strips the starter's own \
                  tooling, and leaves a ready-to-publish library named after \
                  your project.",
    after_help = "EXAMPLES:\n\
        \x20 sprout new my-lib -d \"A small library\"\n\
        \x20 sprout new my-lib --dom --yarn --no-install\n\
        \x20 sprout new my-lib --template-dir ../typescript-starter -y\n\
        \x20 sprout completions bash > /usr/share/bash-completion/completions/sprout",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the starter template.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 sprout new my-lib\n\
            \x20 sprout new my-lib --no-runtime --dom\n\
            \x20 sprout new my-lib --name \"Ada Lovelace\" --email ada@example.com"
    )]
    New(NewArgs),

    /// Initialise a Sprout configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sprout init\n\
            \x20 sprout init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sprout completions bash > ~/.local/share/bash-completion/completions/sprout\n\
            \x20 sprout completions zsh  > ~/.zfunc/_sprout\n\
            \x20 sprout completions fish > ~/.config/fish/completions/sprout.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Sprout configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sprout config get defaults.package_manager\n\
            \x20 sprout config list\n\
            \x20 sprout config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `sprout new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Package name; also the directory created. Prompted for when omitted
    /// in an interactive build.
    #[arg(value_name = "NAME", help = "Project (npm package) name")]
    pub name: Option<String>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "One-line package description"
    )]
    pub description: Option<String>,

    /// Keep the browser DOM typings and the browser-only module.
    #[arg(long = "dom", help = "Include DOM type definitions")]
    pub dom: bool,

    /// Drop the runtime typings and the modules that need them.
    #[arg(long = "no-runtime", help = "Exclude Node.js type definitions")]
    pub no_runtime: bool,

    #[arg(long = "yarn", help = "Use yarn instead of npm")]
    pub yarn: bool,

    #[arg(long = "no-install", help = "Skip installing dependencies")]
    pub no_install: bool,

    #[arg(long = "no-editor-config", help = "Remove the editor settings directory")]
    pub no_editor_config: bool,

    /// Git repository to clone the template from.
    #[arg(
        long = "template",
        value_name = "URL",
        conflicts_with = "template_dir",
        help = "Template git repository"
    )]
    pub template: Option<String>,

    #[arg(
        long = "branch",
        value_name = "BRANCH",
        requires = "template",
        help = "Branch or tag of the template repository"
    )]
    pub branch: Option<String>,

    /// Copy the template from a local directory instead of cloning.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Local template directory"
    )]
    pub template_dir: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory to create the project in (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long = "name", value_name = "NAME", help = "Author name for the initial commit")]
    pub author_name: Option<String>,

    #[arg(long = "email", value_name = "EMAIL", help = "Author email for the initial commit")]
    pub author_email: Option<String>,

    #[arg(
        long = "github-user",
        value_name = "USER",
        help = "GitHub user owning the repository"
    )]
    pub github_user: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sprout init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sprout completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `sprout config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.package_manager`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "sprout",
            "new",
            "my-lib",
            "-d",
            "A library",
            "--dom",
            "--no-runtime",
            "--yarn",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name.as_deref(), Some("my-lib"));
        assert_eq!(args.description.as_deref(), Some("A library"));
        assert!(args.dom && args.no_runtime && args.yarn);
        assert!(!args.no_install);
    }

    #[test]
    fn name_is_optional() {
        let cli = Cli::parse_from(["sprout", "new"]);
        assert!(matches!(cli.command, Commands::New(NewArgs { name: None, .. })));
    }

    #[test]
    fn template_sources_conflict() {
        let result = Cli::try_parse_from([
            "sprout",
            "new",
            "x",
            "--template",
            "https://example.com/t.git",
            "--template-dir",
            "/tmp/t",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn branch_requires_template() {
        assert!(Cli::try_parse_from(["sprout", "new", "x", "--branch", "main"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["sprout", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }
}
