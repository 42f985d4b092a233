// ddc-core/src/application/generator.rs

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::renderer::CheckRenderer;
use crate::domain::check::{
    CheckConfig, CheckType, DEFAULT_FRESHNESS_COLUMN, DEFAULT_FRESHNESS_INTERVAL,
    DEFAULT_UNIQUE_KEY, GeneratedCheck, create_table_fqdn,
};
use crate::domain::error::DomainError;
use crate::domain::model::ModelConfig;
use crate::domain::profile::TableLocation;
use crate::error::DdcError;
use crate::infrastructure::compiler::jinja::JinjaRenderer;
use crate::infrastructure::config::settings::GeneratorSettings;
use crate::infrastructure::dbt::{ModelDescriptor, ProfileResolver, ScheduleIndex};

/// Everything produced for one model: where it lives and its rendered checks.
#[derive(Debug, Clone, Serialize)]
pub struct CheckBundle {
    pub model: String,
    /// Last path segment of `model` (the warehouse table name).
    pub table: String,
    pub environment: String,
    pub database: String,
    pub schema: String,
    pub table_fqdn: String,
    pub checks: Vec<GeneratedCheck>,
}

/// model name + environment -> the three rendered checks.
///
/// Each call resolves everything from disk again; no state is kept between calls.
pub struct Generator {
    models: ModelDescriptor,
    scheduling: ScheduleIndex,
    profiles: ProfileResolver,
    renderer: CheckRenderer<JinjaRenderer>,
}

impl Generator {
    /// Validates the settings and loads profiles.yml and the templates.
    /// Any failure here is a configuration error.
    #[instrument(skip(settings), fields(dbt = ?settings.dbt_directory))]
    pub fn new(settings: &GeneratorSettings) -> Result<Self, DdcError> {
        settings.check()?;

        let scheduling = ScheduleIndex::new(settings.scheduling_dir())?;
        let profiles = ProfileResolver::load(
            &settings.profiles_path(),
            &settings.profile_namespace,
            scheduling.clone(),
        )?;
        let engine = JinjaRenderer::from_dir(&settings.templates_directory)?;
        let renderer = CheckRenderer::new(Arc::new(engine))?;

        info!("Generator initialized");
        Ok(Self::from_parts(
            ModelDescriptor::new(settings.models_dir()),
            scheduling,
            profiles,
            renderer,
        ))
    }

    pub fn from_parts(
        models: ModelDescriptor,
        scheduling: ScheduleIndex,
        profiles: ProfileResolver,
        renderer: CheckRenderer<JinjaRenderer>,
    ) -> Self {
        Self {
            models,
            scheduling,
            profiles,
            renderer,
        }
    }

    /// Checks in fixed order: duplicates, completeness, freshness.
    pub fn generate(&self, model_name: &str, environment: &str) -> Result<Vec<GeneratedCheck>, DdcError> {
        Ok(self.generate_bundle(model_name, environment)?.checks)
    }

    #[instrument(skip(self))]
    pub fn generate_bundle(&self, model_name: &str, environment: &str) -> Result<CheckBundle, DdcError> {
        // 1. Model source
        let model = self.models.parse(model_name)?;

        // 2. Scheduling
        let pipeline = self
            .scheduling
            .find_pipeline_config(model_name)
            .ok_or_else(|| DomainError::PipelineNotFound(model_name.to_string()))?;

        // 3. Profile target
        let TableLocation { database, schema } = self
            .profiles
            .get_database_schema(model_name, environment)
            .map_err(|reason| DomainError::TargetNotFound {
                model: model_name.to_string(),
                environment: environment.to_string(),
                reason: reason.to_string(),
            })?;

        let table = table_name(model_name);
        let table_fqdn = create_table_fqdn(&database, &schema, table);
        info!(%table_fqdn, pipeline = %pipeline.pipeline_name, "Resolved model location");

        // 4. Checks
        let base = CheckConfig {
            table: Some(table.to_string()),
            table_fqdn: Some(table_fqdn.clone()),
            schedule_interval: Some(pipeline.schedule_interval()),
            ..Default::default()
        };

        let checks = CheckType::ALL
            .into_iter()
            .map(|check_type| {
                info!(%check_type, "Generating check");
                let config = check_config(check_type, table, &model, &base);
                let content = self.renderer.generate(check_type, &config)?;
                Ok::<_, DdcError>(GeneratedCheck {
                    check_type,
                    content,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CheckBundle {
            model: model_name.to_string(),
            table: table.to_string(),
            environment: environment.to_string(),
            database,
            schema,
            table_fqdn,
            checks,
        })
    }
}

fn table_name(model_name: &str) -> &str {
    model_name.rsplit('/').next().unwrap_or(model_name)
}

fn check_config(
    check_type: CheckType,
    table: &str,
    model: &ModelConfig,
    base: &CheckConfig,
) -> CheckConfig {
    let unique_key = model
        .unique_key
        .clone()
        .unwrap_or_else(|| DEFAULT_UNIQUE_KEY.to_string());

    match check_type {
        CheckType::Duplicates => CheckConfig {
            name: Some(format!("{} duplicate check", table)),
            description: Some(format!("Check for duplicates in {}", table)),
            column_name: Some(unique_key),
            ..base.clone()
        },
        CheckType::Completeness => CheckConfig {
            name: Some(format!("{} completeness check", table)),
            description: Some(format!("Check completeness of {}", table)),
            column_name: Some(unique_key),
            ..base.clone()
        },
        CheckType::Freshness => CheckConfig {
            name: Some(format!("{} freshness check", table)),
            description: Some(format!("Check freshness of {}", table)),
            column_name: Some(
                model
                    .first_timestamp_column()
                    .unwrap_or(DEFAULT_FRESHNESS_COLUMN)
                    .to_string(),
            ),
            freshness_interval: Some(DEFAULT_FRESHNESS_INTERVAL.to_string()),
            ..base.clone()
        },
    }
}
