// ddc-core/src/domain/model.rs

use serde::Serialize;
use std::collections::BTreeMap;

/// Configuration scraped from a dbt model source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    /// `unique_key` of the `{{ config(...) }}` block. `None` when no block declares one.
    pub unique_key: Option<String>,

    /// Identifiers ending in `_at`, `_timestamp` or `_date`, in order of first appearance.
    pub timestamp_columns: Vec<String>,

    /// Every quoted `key='value'` pair found in the config block(s), last write wins.
    pub settings: BTreeMap<String, String>,
}

impl ModelConfig {
    pub fn first_timestamp_column(&self) -> Option<&str> {
        self.timestamp_columns.first().map(String::as_str)
    }
}
