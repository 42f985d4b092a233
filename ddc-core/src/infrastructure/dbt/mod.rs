// ddc-core/src/infrastructure/dbt/mod.rs

// Read-only adapters over a dbt project: model SQL, scheduling pipelines, profiles.
pub mod model;
pub mod profiles;
pub mod scheduling;

pub use model::ModelDescriptor;
pub use profiles::ProfileResolver;
pub use scheduling::ScheduleIndex;
