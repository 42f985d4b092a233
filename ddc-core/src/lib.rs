// ddc-core/src/lib.rs

//! Data-quality check generation for dbt models: resolves where a model is
//! deployed, renders the duplicates / completeness / freshness checks and
//! publishes them to a checks repository.

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// Traits the application depends on: TemplateEngine, VersionControl
pub mod ports;

// Checks, model/pipeline/profile shapes and the cron-to-interval mapping.
// No I/O here.
pub mod domain;

// dbt project reader, minijinja renderer, settings, check writer, git + GitHub
pub mod infrastructure;

// `generate` and `publish` use cases
pub mod application;

pub mod error;

pub use error::DdcError;
