// ddc-core/src/infrastructure/config/mod.rs

pub mod settings;

pub use settings::{GeneratorSettings, PublishSettings};
