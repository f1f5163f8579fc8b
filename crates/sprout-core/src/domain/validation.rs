use crate::domain::{
    error::DomainError,
    project::{ProjectConfig, ProjectName},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across the pipeline.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project_name(name: &str) -> Result<ProjectName, DomainError> {
        ProjectName::parse(name)
    }

    /// Re-check a config that may have been assembled field by field.
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        ProjectName::parse(config.project_name.as_str())?;
        if config.github_username.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "github username",
            });
        }
        Ok(())
    }
}
