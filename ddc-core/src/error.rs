// ddc-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DdcError {
    // --- ERREURS DU DOMAINE (Not found, Validation) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Config, Git) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl DdcError {
    /// Model, pipeline or profile target could not be resolved.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DdcError::Domain(e) if e.is_not_found())
    }

    /// A check configuration was rejected before rendering.
    pub fn is_validation(&self) -> bool {
        matches!(self, DdcError::Domain(e) if e.is_validation())
    }

    /// Structurally fatal setup problem (raised at construction).
    pub fn is_configuration(&self) -> bool {
        matches!(self, DdcError::Infrastructure(e) if e.is_configuration())
    }
}

impl From<std::io::Error> for DdcError {
    fn from(err: std::io::Error) -> Self {
        DdcError::Infrastructure(InfrastructureError::Io(err))
    }
}
