// ddc-core/src/application/renderer.rs

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::check::{CheckConfig, CheckType, DEFAULT_TARGET_DATE_COLUMN};
use crate::domain::error::DomainError;
use crate::error::DdcError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::TemplateEngine;

/// Validates, normalizes and renders the three check templates.
///
/// Template content is owned by the templates themselves; the renderer only
/// guarantees which values are substituted and that they are lowercased.
pub struct CheckRenderer<T: TemplateEngine> {
    engine: Arc<T>,
}

impl<T: TemplateEngine> Clone for CheckRenderer<T> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<T: TemplateEngine> CheckRenderer<T> {
    /// Fails when any of the three templates cannot be loaded.
    pub fn new(engine: Arc<T>) -> Result<Self, DdcError> {
        let missing: Vec<String> = CheckType::ALL
            .iter()
            .map(CheckType::template_name)
            .filter(|name| !engine.has_template(name))
            .collect();

        if !missing.is_empty() {
            error!(?missing, "Failed to load check templates");
            return Err(InfrastructureError::ConfigError(format!(
                "Template not found: {}",
                missing.join(", ")
            ))
            .into());
        }

        Ok(Self { engine })
    }

    pub fn generate_duplicates_check(&self, config: &CheckConfig) -> Result<String, DdcError> {
        config.validate()?;
        self.render(CheckType::Duplicates, context(&config.normalized())?)
    }

    pub fn generate_completeness_check(&self, config: &CheckConfig) -> Result<String, DdcError> {
        config.validate()?;
        let normalized = config.normalized();

        let mut ctx = context(&normalized)?;
        if let Value::Object(map) = &mut ctx {
            let target_date_column = normalized
                .extra
                .get("date_column")
                .cloned()
                .unwrap_or_else(|| DEFAULT_TARGET_DATE_COLUMN.to_string());
            map.insert("target_table".into(), normalized.table.clone().into());
            map.insert("target_date_column".into(), target_date_column.into());
        }
        self.render(CheckType::Completeness, ctx)
    }

    pub fn generate_freshness_check(&self, config: &CheckConfig) -> Result<String, DdcError> {
        config.validate()?;
        if config.freshness_interval.is_none() {
            return Err(DomainError::MissingFreshnessInterval.into());
        }
        self.render(CheckType::Freshness, context(&config.normalized())?)
    }

    /// Dispatch on the check type.
    pub fn generate(&self, check_type: CheckType, config: &CheckConfig) -> Result<String, DdcError> {
        match check_type {
            CheckType::Duplicates => self.generate_duplicates_check(config),
            CheckType::Completeness => self.generate_completeness_check(config),
            CheckType::Freshness => self.generate_freshness_check(config),
        }
    }

    fn render(&self, check_type: CheckType, ctx: Value) -> Result<String, DdcError> {
        debug!(%check_type, "Rendering check template");
        self.engine
            .render(&check_type.template_name(), &ctx)
            .inspect_err(|e| error!(%check_type, error = %e, "Failed to generate check"))
    }
}

fn context(config: &CheckConfig) -> Result<Value, DdcError> {
    serde_json::to_value(config).map_err(|e| {
        InfrastructureError::ConfigError(format!("Unserializable check config: {}", e)).into()
    })
}
