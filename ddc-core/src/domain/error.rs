// ddc-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    // --- NOT FOUND (resolution chain) ---
    #[error("Model file not found for: {0}")]
    #[diagnostic(
        code(ddc::domain::model_not_found),
        help("The model must exist as '<name>.sql' somewhere under the dbt 'models/' directory.")
    )]
    ModelNotFound(String),

    #[error("No pipeline configuration found for model '{0}'")]
    #[diagnostic(
        code(ddc::domain::pipeline_not_found),
        help("Declare the model under 'models:' in a scheduling/**/pipeline.yml file.")
    )]
    PipelineNotFound(String),

    #[error("No database/schema found for model '{model}' in environment '{environment}' ({reason})")]
    #[diagnostic(
        code(ddc::domain::target_not_found),
        help("Check that profiles.yml declares an output named '<deploy_profile>_<environment>'.")
    )]
    TargetNotFound {
        model: String,
        environment: String,
        reason: String,
    },

    // --- VALIDATION (check configuration) ---
    #[error("Missing required fields: {}", .0.join(", "))]
    #[diagnostic(code(ddc::domain::validation))]
    MissingFields(Vec<String>),

    #[error("freshness_interval is required for freshness checks")]
    #[diagnostic(code(ddc::domain::validation))]
    MissingFreshnessInterval,

    // --- PUBLICATION ---
    #[error("No checks could be generated for: {}", .0.join(", "))]
    #[diagnostic(
        code(ddc::domain::nothing_generated),
        help("Run 'ddc generate <MODEL>' on one of them to see why it fails.")
    )]
    NothingGenerated(Vec<String>),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::ModelNotFound(_)
                | DomainError::PipelineNotFound(_)
                | DomainError::TargetNotFound { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::MissingFields(_) | DomainError::MissingFreshnessInterval
        )
    }
}
