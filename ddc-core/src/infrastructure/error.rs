// ddc-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(ddc::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(ddc::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(ddc::infra::config))]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(ddc::infra::config_missing))]
    ConfigNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(ddc::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the check templates.")
    )]
    TemplateError(#[from] minijinja::Error),

    // --- PUBLISHING ---
    #[error("Git command failed: {0}")]
    #[diagnostic(
        code(ddc::infra::git),
        help("Run the same git command inside the checks repository to see the full output.")
    )]
    Git(String),

    #[error("GitHub API Error: {0}")]
    #[diagnostic(
        code(ddc::infra::http),
        help("Check GITHUB_TOKEN and the repository slug.")
    )]
    Http(#[from] reqwest::Error),
}

impl InfrastructureError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            InfrastructureError::ConfigError(_) | InfrastructureError::ConfigNotFound(_)
        )
    }
}
