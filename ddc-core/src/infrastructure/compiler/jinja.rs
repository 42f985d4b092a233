// ddc-core/src/infrastructure/compiler/jinja.rs

// Bridge between the check templates on disk ({{ name }}, {{ table_fqdn }}, ...)
// and the rendered YAML documents.

use minijinja::Environment;
use std::path::Path;

use crate::error::DdcError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::TemplateEngine;

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    fn base_env() -> Environment<'static> {
        let mut env = Environment::new();
        // Generated files must end with a newline, like the templates
        env.set_keep_trailing_newline(true);
        env
    }

    /// Templates are read lazily from `dir` by file name (`freshness.yml`, ...).
    pub fn from_dir(dir: &Path) -> Result<Self, InfrastructureError> {
        if !dir.is_dir() {
            return Err(InfrastructureError::ConfigNotFound(format!(
                "Template directory not found: {}",
                dir.display()
            )));
        }
        let mut env = Self::base_env();
        env.set_loader(minijinja::path_loader(dir));
        Ok(Self { env })
    }

    /// In-memory templates, keyed by name.
    pub fn from_sources<I, N, S>(templates: I) -> Result<Self, InfrastructureError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = Self::base_env();
        for (name, source) in templates {
            env.add_template_owned(name.into(), source.into())?;
        }
        Ok(Self { env })
    }
}

impl TemplateEngine for JinjaRenderer {
    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, DdcError> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(InfrastructureError::TemplateError)?;
        tmpl.render(context)
            .map_err(|e| InfrastructureError::TemplateError(e).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_render_in_memory() -> Result<()> {
        let renderer = JinjaRenderer::from_sources([("t.yml", "from {{ table_fqdn }}\n")])?;
        let out = renderer.render("t.yml", &json!({ "table_fqdn": "db.s.t" }))?;
        assert_eq!(out, "from db.s.t\n");
        Ok(())
    }

    #[test]
    fn test_escaped_placeholders_survive() -> Result<()> {
        let renderer =
            JinjaRenderer::from_sources([("t.yml", "from {{ '{{ source_table }}' }}")])?;
        let out = renderer.render("t.yml", &json!({}))?;
        assert_eq!(out, "from {{ source_table }}");
        Ok(())
    }

    #[test]
    fn test_from_dir_loads_by_file_name() -> Result<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("freshness.yml"), "every: {{ interval | upper }}")?;

        let renderer = JinjaRenderer::from_dir(dir.path())?;
        assert!(renderer.has_template("freshness.yml"));
        assert!(!renderer.has_template("duplicates.yml"));
        assert_eq!(
            renderer.render("freshness.yml", &json!({ "interval": "24h" }))?,
            "every: 24H"
        );
        Ok(())
    }

    #[test]
    fn test_missing_dir_is_config_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            JinjaRenderer::from_dir(&dir.path().join("templates")),
            Err(InfrastructureError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_case_filters_come_from_builtins() -> Result<()> {
        let renderer = JinjaRenderer::from_sources([("t.yml", "{{ db | lower }}.{{ schema | upper }}")])?;
        let out = renderer.render("t.yml", &json!({ "db": "TEST_DB", "schema": "mart" }))?;
        assert_eq!(out, "test_db.MART");
        Ok(())
    }
}
