//! Implementation of the `sprout new` command.
//!
//! Responsibility: turn flags, config and (optionally) prompt answers into a
//! `ProjectConfig`, call the core scaffold service, and display results. No
//! scaffolding rules live here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument};

use sprout_adapters::{
    CommandInstaller, GitCommitter, LocalFilesystem, TracingReporter, provisioner_for,
};
use sprout_core::{
    application::{ScaffoldReport, ScaffoldService, ports::ProgressReporter},
    domain::{Identity, PackageManager, ProjectConfig, TemplateSource},
};

use crate::{
    cli::{NewArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::SpinnerReporter,
};

/// Everything `new` needs to know before the template source is resolved.
///
/// Filled from flags first, then config defaults, then (when the name is
/// missing) interactive prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub name: Option<String>,
    pub description: String,
    pub dom: bool,
    pub runtime: bool,
    pub package_manager: PackageManager,
    pub install: bool,
    pub editor_config: bool,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub github_user: Option<String>,
}

impl Answers {
    pub fn from_args(args: &NewArgs, config: &AppConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            name: args.name.clone(),
            description: args.description.clone().unwrap_or_default(),
            dom: args.dom || defaults.dom,
            runtime: !args.no_runtime && defaults.runtime,
            package_manager: if args.yarn {
                PackageManager::Yarn
            } else {
                defaults.package_manager
            },
            install: !args.no_install && defaults.install,
            editor_config: !args.no_editor_config && defaults.editor_config,
            author_name: args.author_name.clone().or_else(|| defaults.author_name.clone()),
            author_email: args
                .author_email
                .clone()
                .or_else(|| defaults.author_email.clone()),
            github_user: args.github_user.clone().or_else(|| defaults.github_user.clone()),
        }
    }

    /// Build the core config. Unset identity fields keep their placeholders,
    /// which disables the initial commit.
    pub fn into_config(
        self,
        template: TemplateSource,
        working_directory: &Path,
    ) -> CliResult<ProjectConfig> {
        let name = self.name.ok_or_else(|| CliError::InvalidInput {
            message: "a project name is required".into(),
            source: None,
        })?;
        let placeholder = Identity::placeholder();
        let identity = Identity::new(
            self.author_name.unwrap_or(placeholder.full_name),
            self.author_email.unwrap_or(placeholder.email),
        );

        let mut builder = ProjectConfig::builder()
            .project_name(name)
            .description(self.description)
            .identity(identity)
            .dom_typings(self.dom)
            .runtime_typings(self.runtime)
            .package_manager(self.package_manager)
            .install_dependencies(self.install)
            .keep_editor_config(self.editor_config)
            .working_directory(working_directory)
            .template(template);
        if let Some(user) = self.github_user {
            builder = builder.github_username(user);
        }
        Ok(builder.build()?)
    }
}

/// Execute the `sprout new` command.
///
/// Dispatch sequence:
/// 1. Collect answers from flags and config, prompting if the name is missing
/// 2. Resolve the template source and build a `ProjectConfig`
/// 3. Confirm with user unless `--yes`, `--quiet` or `--dry-run`
/// 4. Early-exit if `--dry-run`
/// 5. Execute scaffolding via `ScaffoldService`
/// 6. Print next-steps guidance
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Answers
    let mut answers = Answers::from_args(&args, &config);
    if answers.name.is_none() {
        if args.yes {
            return Err(CliError::InvalidInput {
                message: "a project name is required with --yes".into(),
                source: None,
            });
        }
        answers = prompt(answers)?;
    }

    // 2. Project config
    let template = resolve_template(&args, &config)?;
    let working_directory = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let project = answers.into_config(template, &working_directory)?;
    debug!(
        project = %project.project_name,
        template = %project.template,
        package_manager = %project.package_manager,
        "Project configuration resolved"
    );

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&project, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        return describe(&project, &output);
    }

    // 5. Create adapters and scaffold
    let reporter: Arc<dyn ProgressReporter> = if output.is_interactive() {
        Arc::new(SpinnerReporter::new(!output.supports_color()))
    } else {
        Arc::new(TracingReporter)
    };
    let service = ScaffoldService::new(
        Arc::new(LocalFilesystem::new()),
        provisioner_for(&project.template),
        Arc::new(CommandInstaller::new()),
        Arc::new(GitCommitter::new(template_label(&project.template))),
        reporter,
    );

    output.header(&format!("Creating '{}'...", project.project_name))?;
    info!(project = %project.project_name, "Scaffold started");

    let report = service.scaffold(&project)?;

    // 6. Success + next steps
    output.success(&format!(
        "Project '{}' created at {}",
        project.project_name,
        report.project_path.display()
    ))?;
    if !global.quiet {
        print_next_steps(&project, &report, &output)?;
    }

    Ok(())
}

/// Ask for whatever the flags left open.
#[cfg(feature = "interactive")]
fn prompt(answers: Answers) -> CliResult<Answers> {
    super::prompt::complete(answers)
}

#[cfg(not(feature = "interactive"))]
fn prompt(_answers: Answers) -> CliResult<Answers> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Template resolution ───────────────────────────────────────────────────────

pub fn resolve_template(args: &NewArgs, config: &AppConfig) -> CliResult<TemplateSource> {
    if let Some(dir) = &args.template_dir {
        if !dir.is_dir() {
            return Err(CliError::TemplateNotFound { path: dir.clone() });
        }
        return Ok(TemplateSource::Directory(dir.clone()));
    }

    Ok(match &args.template {
        Some(repository) => TemplateSource::Git {
            repository: repository.clone(),
            branch: args.branch.clone(),
        },
        None => TemplateSource::Git {
            repository: config.template.repository.clone(),
            branch: config.template.branch.clone(),
        },
    })
}

/// Short template name for the initial commit message.
pub fn template_label(source: &TemplateSource) -> String {
    let raw = match source {
        TemplateSource::Git { repository, .. } => repository.as_str(),
        TemplateSource::Directory(path) => path.to_str().unwrap_or_default(),
    };
    let last = raw
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(raw);
    let label = last.strip_suffix(".git").unwrap_or(last);
    if label.is_empty() {
        "template".to_string()
    } else {
        label.to_string()
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(project: &ProjectConfig, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:         {}", project.project_name))?;
    out.print(&format!("  Description:     {}", project.description))?;
    out.print(&format!("  Location:        {}", project.project_path().display()))?;
    out.print(&format!("  Template:        {}", project.template))?;
    out.print(&format!("  Package manager: {}", project.package_manager))?;
    out.print(&format!("  DOM typings:     {}", yes_no(project.include_dom_typings)))?;
    out.print(&format!("  Node typings:    {}", yes_no(project.include_runtime_typings)))?;
    out.print(&format!("  Install:         {}", yes_no(project.install_dependencies)))?;
    out.print(&format!("  Editor settings: {}", yes_no(project.keep_editor_config)))?;
    out.print(&format!("  Initial commit:  {}", yes_no(project.identity.is_customized())))?;
    out.print("")?;
    Ok(())
}

fn describe(project: &ProjectConfig, out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(&json!({
            "name": project.project_name.as_str(),
            "description": project.description,
            "path": project.project_path(),
            "repository": project.repository_url(),
            "template": project.template.to_string(),
            "package_manager": project.package_manager,
            "dom": project.include_dom_typings,
            "runtime": project.include_runtime_typings,
            "install": project.install_dependencies,
            "editor_config": project.keep_editor_config,
            "commit": project.identity.is_customized(),
        }))?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create '{}' at {}",
        project.project_name,
        project.project_path().display(),
    ))?;
    out.info(&format!("  Template:        {}", project.template))?;
    out.info(&format!("  Package manager: {}", project.package_manager))?;
    out.info(&format!("  Repository:      {}", project.repository_url()))?;
    Ok(())
}

fn print_next_steps(
    project: &ProjectConfig,
    report: &ScaffoldReport,
    out: &OutputManager,
) -> CliResult<()> {
    let pm = project.package_manager;
    out.print("")?;
    if !report.committed {
        out.warning("No initial commit was made (author name or email not set)")?;
    }
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", report.project_path.display()))?;
    if !report.installed {
        out.print(&format!("  {} install", pm))?;
    }
    out.print(&format!("  {} test", pm))?;
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e.into(),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
