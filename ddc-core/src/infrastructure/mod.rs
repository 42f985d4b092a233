// ddc-core/src/infrastructure/mod.rs

pub mod compiler;
pub mod config;
pub mod dbt;
pub mod error;
pub mod fs;
pub mod publish;
