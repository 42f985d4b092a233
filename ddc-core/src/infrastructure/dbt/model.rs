// ddc-core/src/infrastructure/dbt/model.rs

// Lexical scan of a dbt model file. No SQL parsing: the accepted grammar is
//
//   {{ config( key='value', key2="value", ... ) }}
//
// i.e. one block marker, identifier keys, and single or double quoted string
// values. Lists, booleans and nested calls inside the block are ignored.

use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::error::DomainError;
use crate::domain::model::ModelConfig;
use crate::error::DdcError;
use crate::infrastructure::error::InfrastructureError;

const MODEL_EXTENSION: &str = "sql";

// SQL builtins that look like timestamp columns
const SQL_BUILTINS: [&str; 9] = [
    "current_date",
    "current_timestamp",
    "localtimestamp",
    "sysdate",
    "to_date",
    "to_timestamp",
    "try_to_date",
    "try_to_timestamp",
    "convert_timezone",
];

fn re_config_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*config\s*\(([^}]+)\s*\)\s*\}\}")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_config_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(\w+)\s*=\s*(?:'([^']*)'|"([^"]*)")"#)
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_timestamp_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([a-z_][a-z0-9_]*(?:_at|_timestamp|_date))\b")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Reads model files under `<dbt>/models`.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    models_dir: PathBuf,
}

impl ModelDescriptor {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    #[instrument(skip(self))]
    pub fn parse(&self, model_name: &str) -> Result<ModelConfig, DdcError> {
        let path = self
            .locate(model_name)
            .ok_or_else(|| DomainError::ModelNotFound(model_name.to_string()))?;
        info!(path = ?path, "Parsing dbt model");

        let content = fs::read_to_string(&path).map_err(InfrastructureError::Io)?;
        let config = parse_model_source(&content);
        debug!(?config, "Parsed model config");
        Ok(config)
    }

    /// First `<model_name>.sql` in traversal order, or the direct path when
    /// the name already contains a sub-directory (`finance/fact_orders`).
    pub fn locate(&self, model_name: &str) -> Option<PathBuf> {
        let file_name = format!("{}.{}", model_name, MODEL_EXTENSION);

        if model_name.contains('/') {
            let direct = self.models_dir.join(&file_name);
            return direct.is_file().then_some(direct);
        }

        WalkDir::new(&self.models_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name().to_str() == Some(file_name.as_str()))
            .map(|e| e.into_path())
    }
}

pub fn parse_model_source(content: &str) -> ModelConfig {
    let mut config = ModelConfig::default();

    // 1. Config blocks: every block is scanned, the last value wins
    for block in re_config_block().captures_iter(content) {
        for pair in re_config_pair().captures_iter(&block[1]) {
            let value = pair
                .get(2)
                .or_else(|| pair.get(3))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            config.settings.insert(pair[1].to_string(), value);
        }
    }
    config.unique_key = config
        .settings
        .get("unique_key")
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    // 2. Timestamp-like identifiers anywhere in the file
    let mut seen = HashSet::new();
    for cap in re_timestamp_column().captures_iter(content) {
        let column = cap[1].to_string();
        if SQL_BUILTINS.contains(&column.to_lowercase().as_str()) {
            continue;
        }
        if seen.insert(column.clone()) {
            config.timestamp_columns.push(column);
        }
    }

    config
}
