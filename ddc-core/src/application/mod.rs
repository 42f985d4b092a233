// ddc-core/src/application/mod.rs

pub mod generator;
pub mod publish;
pub mod renderer;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use ddc_core::application::{Generator, publish, PublishRequest};`

pub use generator::{CheckBundle, Generator};
pub use publish::{FailedModel, PublishReport, PublishRequest, PublishedModel, publish};
pub use renderer::CheckRenderer;
