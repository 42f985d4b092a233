// ddc-core/src/infrastructure/dbt/scheduling.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::domain::pipeline::{PipelineConfig, PipelineDocument};
use crate::infrastructure::error::InfrastructureError;

const PIPELINE_SUFFIX: &str = "pipeline.yml";

/// Finds the pipeline document declaring a model under `<dbt>/scheduling`.
///
/// Nothing is cached: every lookup walks the tree again.
#[derive(Debug, Clone)]
pub struct ScheduleIndex {
    scheduling_dir: PathBuf,
}

impl ScheduleIndex {
    /// Fails when the scheduling directory does not exist.
    pub fn new(scheduling_dir: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let scheduling_dir = scheduling_dir.into();
        if !scheduling_dir.is_dir() {
            return Err(InfrastructureError::ConfigNotFound(format!(
                "Scheduling directory not found: {}",
                scheduling_dir.display()
            )));
        }
        info!(dir = ?scheduling_dir, "Initialized schedule index");
        Ok(Self { scheduling_dir })
    }

    /// First pipeline document (in file-name order) whose `models` list has an
    /// entry named exactly `model_name`. Unreadable or malformed documents are
    /// logged and skipped.
    #[instrument(skip(self))]
    pub fn find_pipeline_config(&self, model_name: &str) -> Option<PipelineConfig> {
        debug!("Searching for pipeline config");

        for path in self.pipeline_files() {
            let document = match load_pipeline_document(&path) {
                Ok(Some(doc)) => doc,
                Ok(None) => continue,
                Err(e) => {
                    warn!(path = ?path, error = %e, "Skipping unreadable pipeline document");
                    continue;
                }
            };

            if let Some(model) = document.find_model(model_name) {
                info!(path = ?path, profile = ?document.profile, "Found pipeline config");
                return Some(PipelineConfig::from_document(&document, model, path));
            }
        }

        debug!("No pipeline declares this model");
        None
    }

    fn pipeline_files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.scheduling_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.file_name().to_string_lossy().ends_with(PIPELINE_SUFFIX)
            })
            .map(|e| e.into_path())
    }
}

/// `Ok(None)` for an empty document or one that is not a mapping.
fn load_pipeline_document(path: &Path) -> Result<Option<PipelineDocument>, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if !value.is_mapping() {
        return Ok(None);
    }
    Ok(Some(serde_yaml::from_value(value)?))
}
