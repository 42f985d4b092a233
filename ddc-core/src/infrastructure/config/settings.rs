// ddc-core/src/infrastructure/config/settings.rs

// Explicit configuration handed to each component. Nothing in ddc-core reads
// the process environment: the CLI resolves flags / env vars into these structs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use validator::{Validate, ValidationError};

use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_PROFILE_NAMESPACE: &str = "instacart";
pub const DEFAULT_PROFILES_FILE: &str = "profiles.yml";
pub const DEFAULT_BASE_BRANCH: &str = "master";
pub const DEFAULT_COMMIT_MESSAGE: &str = "feat: add ddc checks";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeneratorSettings {
    /// Root of the dbt project (contains `models/` and `scheduling/`).
    #[validate(custom(function = "validate_directory"))]
    pub dbt_directory: PathBuf,

    /// Directory holding `profiles.yml`.
    #[validate(custom(function = "validate_directory"))]
    pub profiles_directory: PathBuf,

    /// Directory holding `duplicates.yml`, `completeness.yml`, `freshness.yml`.
    #[validate(custom(function = "validate_directory"))]
    pub templates_directory: PathBuf,

    /// Top-level key of profiles.yml whose `outputs` are searched.
    #[validate(length(min = 1, message = "Profile namespace cannot be empty"))]
    #[serde(default = "default_profile_namespace")]
    pub profile_namespace: String,

    #[validate(length(min = 1))]
    #[serde(default = "default_profiles_file")]
    pub profiles_file: String,
}

impl GeneratorSettings {
    pub fn new(
        dbt_directory: impl Into<PathBuf>,
        profiles_directory: impl Into<PathBuf>,
        templates_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dbt_directory: dbt_directory.into(),
            profiles_directory: profiles_directory.into(),
            templates_directory: templates_directory.into(),
            profile_namespace: default_profile_namespace(),
            profiles_file: default_profiles_file(),
        }
    }

    pub fn with_profile_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.profile_namespace = namespace.into();
        self
    }

    /// Fails with a ConfigError naming every invalid field.
    #[instrument(skip(self))]
    pub fn check(&self) -> Result<(), InfrastructureError> {
        self.validate()
            .map_err(|e| InfrastructureError::ConfigError(format!("Invalid settings: {}", e)))?;
        debug!(dbt = ?self.dbt_directory, "Settings validated");
        Ok(())
    }

    pub fn models_dir(&self) -> PathBuf {
        self.dbt_directory.join("models")
    }

    pub fn scheduling_dir(&self) -> PathBuf {
        self.dbt_directory.join("scheduling")
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.profiles_directory.join(&self.profiles_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PublishSettings {
    /// Local clone of the repository receiving the check files.
    #[validate(custom(function = "validate_directory"))]
    pub checks_directory: PathBuf,

    #[serde(default, skip_serializing)]
    pub github_token: Option<String>,

    /// `owner/name` of the checks repository on GitHub.
    #[validate(custom(function = "validate_repository_slug"))]
    pub github_repository: Option<String>,

    #[validate(length(min = 1))]
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    #[serde(default = "default_true")]
    pub draft: bool,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl PublishSettings {
    pub fn new(checks_directory: impl Into<PathBuf>) -> Self {
        Self {
            checks_directory: checks_directory.into(),
            github_token: None,
            github_repository: None,
            base_branch: default_base_branch(),
            draft: true,
            commit_message: default_commit_message(),
        }
    }

    pub fn check(&self) -> Result<(), InfrastructureError> {
        self.validate().map_err(|e| {
            InfrastructureError::ConfigError(format!("Invalid publish settings: {}", e))
        })
    }
}

fn validate_directory(path: &Path) -> Result<(), ValidationError> {
    if path.is_dir() {
        Ok(())
    } else {
        let mut err = ValidationError::new("directory_missing");
        err.message = Some(format!("Directory does not exist: {}", path.display()).into());
        Err(err)
    }
}

fn validate_repository_slug(slug: &str) -> Result<(), ValidationError> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => {
            let mut err = ValidationError::new("repository_slug");
            err.message = Some(format!("Expected 'owner/name', got '{}'", slug).into());
            Err(err)
        }
    }
}

fn default_profile_namespace() -> String {
    DEFAULT_PROFILE_NAMESPACE.to_string()
}
fn default_profiles_file() -> String {
    DEFAULT_PROFILES_FILE.to_string()
}
fn default_base_branch() -> String {
    DEFAULT_BASE_BRANCH.to_string()
}
fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}
fn default_true() -> bool {
    true
}
