// ddc-core/src/ports/template.rs

use crate::error::DdcError;

pub trait TemplateEngine: Send + Sync {
    /// Whether a template with this name can be loaded.
    fn has_template(&self, name: &str) -> bool;

    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, DdcError>;
}
