// ddc-core/src/domain/pipeline.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::schedule::cron_to_interval;

// =============================================================================
//  1. DOCUMENT (scheduling/**/pipeline.yml)
// =============================================================================

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PipelineDocument {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub models: Vec<PipelineModel>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineModel {
    /// Left untyped: an entry without a usable name is never matched but does
    /// not invalidate the rest of the document.
    #[serde(default)]
    pub name: Option<serde_yaml::Value>,

    // Everything else (tags, sla, ...) is kept as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PipelineModel {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(serde_yaml::Value::as_str)
    }
}

impl PipelineDocument {
    pub fn find_model(&self, model_name: &str) -> Option<&PipelineModel> {
        self.models.iter().find(|m| m.name() == Some(model_name))
    }
}

// =============================================================================
//  2. RESOLVED VIEW
// =============================================================================

/// Scheduling metadata of one model, as declared by the pipeline document that lists it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    pub deploy_profile: String,
    pub schedule: String,
    pub owner: String,
    pub description: String,
    pub model_config: BTreeMap<String, serde_yaml::Value>,

    pub file_path: PathBuf,
    pub pipeline_name: String,
}

impl PipelineConfig {
    pub fn from_document(
        document: &PipelineDocument,
        model: &PipelineModel,
        file_path: PathBuf,
    ) -> Self {
        let pipeline_name = file_path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            deploy_profile: document.profile.clone().unwrap_or_default(),
            schedule: document.schedule.clone().unwrap_or_default(),
            owner: document.owner.clone().unwrap_or_default(),
            description: document.description.clone().unwrap_or_default(),
            model_config: model.extra.clone(),
            file_path,
            pipeline_name,
        }
    }

    /// Check cadence derived from the cron `schedule` (e.g. `0 */2 * * *` -> `2h`).
    pub fn schedule_interval(&self) -> String {
        cron_to_interval(&self.schedule)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DOC: &str = r#"
owner: test.user
profile: finance_data_mart
schedule: "0 */6 * * *"
models:
  - name: fact_test
    tags: [finance]
  - name: dim_test
"#;

    #[test]
    fn test_find_model_exact_name() {
        let doc: PipelineDocument = serde_yaml::from_str(DOC).unwrap();
        assert!(doc.find_model("fact_test").is_some());
        assert!(doc.find_model("fact").is_none());
        assert!(doc.find_model("FACT_TEST").is_none());
    }

    #[test]
    fn test_from_document_keeps_model_extras() {
        let doc: PipelineDocument = serde_yaml::from_str(DOC).unwrap();
        let model = doc.find_model("fact_test").unwrap();
        let cfg = PipelineConfig::from_document(
            &doc,
            model,
            PathBuf::from("/dbt/scheduling/finance/pipeline.yml"),
        );

        assert_eq!(cfg.deploy_profile, "finance_data_mart");
        assert_eq!(cfg.owner, "test.user");
        assert_eq!(cfg.pipeline_name, "finance");
        assert!(cfg.model_config.contains_key("tags"));
        assert_eq!(cfg.schedule_interval(), "6h");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc: PipelineDocument = serde_yaml::from_str("models:\n  - name: a\n").unwrap();
        let cfg = PipelineConfig::from_document(
            &doc,
            doc.find_model("a").unwrap(),
            PathBuf::from("pipeline.yml"),
        );
        assert_eq!(cfg.deploy_profile, "");
        assert_eq!(cfg.schedule_interval(), "24h");
    }

    #[test]
    fn test_entries_without_usable_name_are_ignored() {
        let doc: PipelineDocument = serde_yaml::from_str(
            "profile: finance_data_mart\nmodels:\n  - tags: [x]\n  - name: 42\n  - name: fact_test\n",
        )
        .unwrap();

        assert_eq!(doc.models.len(), 3);
        let model = doc.find_model("fact_test").unwrap();
        assert_eq!(model.name(), Some("fact_test"));
        assert!(doc.find_model("42").is_none());
    }
}
