//! Interactive questions for `sprout new`.

use dialoguer::{Confirm, Input, Select};
use sprout_adapters::GitIdentity;
use sprout_core::domain::{PackageManager, ProjectName, project::PLACEHOLDER_GITHUB_USER};

use crate::{
    commands::new::Answers,
    error::{CliError, CliResult},
};

/// Ask for the name and everything the flags left at their defaults.
pub fn complete(mut answers: Answers) -> CliResult<Answers> {
    let name: String = Input::<String>::new()
        .with_prompt("Package name")
        .validate_with(|input: &String| -> Result<(), String> {
            ProjectName::parse(input.as_str())
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;
    answers.name = Some(name);

    answers.description = Input::<String>::new()
        .with_prompt("Description")
        .default(answers.description)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    answers.runtime = Confirm::new()
        .with_prompt("Include Node.js type definitions?")
        .default(answers.runtime)
        .interact()
        .map_err(prompt_error)?;

    answers.dom = Confirm::new()
        .with_prompt("Include DOM type definitions?")
        .default(answers.dom)
        .interact()
        .map_err(prompt_error)?;

    let managers = [PackageManager::Npm, PackageManager::Yarn];
    let selected = Select::new()
        .with_prompt("Package manager")
        .items(&managers.map(|pm| pm.as_str()))
        .default(usize::from(answers.package_manager.is_alternate()))
        .interact()
        .map_err(prompt_error)?;
    answers.package_manager = managers[selected];

    answers.install = Confirm::new()
        .with_prompt("Install dependencies now?")
        .default(answers.install)
        .interact()
        .map_err(prompt_error)?;

    answers.editor_config = Confirm::new()
        .with_prompt("Keep the VS Code settings?")
        .default(answers.editor_config)
        .interact()
        .map_err(prompt_error)?;

    answers.github_user = Some(
        Input::<String>::new()
            .with_prompt("GitHub user")
            .default(github_user_default(
                answers.github_user,
                GitIdentity::github_user(),
            ))
            .interact_text()
            .map_err(prompt_error)?,
    );

    let detected = GitIdentity::detect();
    answers.author_name = Some(
        Input::<String>::new()
            .with_prompt("Author name")
            .default(answers.author_name.unwrap_or(detected.full_name))
            .interact_text()
            .map_err(prompt_error)?,
    );
    answers.author_email = Some(
        Input::<String>::new()
            .with_prompt("Author email")
            .default(answers.author_email.unwrap_or(detected.email))
            .interact_text()
            .map_err(prompt_error)?,
    );

    Ok(answers)
}

fn prompt_error(e: dialoguer::Error) -> CliError {
    CliError::IoError {
        message: "failed to read answer".into(),
        source: e.into(),
    }
}

/// Configured user first, then git's `github.user`, then the placeholder.
fn github_user_default(configured: Option<String>, detected: Option<String>) -> String {
    configured
        .or(detected)
        .unwrap_or_else(|| PLACEHOLDER_GITHUB_USER.to_string())
}
