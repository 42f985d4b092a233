// ddc-core/src/domain/mod.rs

pub mod check;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod profile;
pub mod schedule;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use check::{CheckConfig, CheckType, GeneratedCheck, create_table_fqdn};
pub use error::DomainError;
pub use model::ModelConfig;
pub use pipeline::{PipelineConfig, PipelineDocument};
pub use profile::{ProfileTarget, TableLocation, Unresolved};
