// ddc-core/src/ports/mod.rs

pub mod template;
pub mod vcs;

pub use template::TemplateEngine;
pub use vcs::VersionControl;
