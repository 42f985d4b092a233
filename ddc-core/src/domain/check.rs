// ddc-core/src/domain/check.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::DomainError;

pub const DEFAULT_UNIQUE_KEY: &str = "id";
pub const DEFAULT_FRESHNESS_COLUMN: &str = "etl_created_date_time_utc";
pub const DEFAULT_FRESHNESS_INTERVAL: &str = "24h";
pub const DEFAULT_TARGET_DATE_COLUMN: &str = "created_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    Duplicates,
    Completeness,
    Freshness,
}

impl CheckType {
    /// Fixed output order.
    pub const ALL: [CheckType; 3] = [
        CheckType::Duplicates,
        CheckType::Completeness,
        CheckType::Freshness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Duplicates => "duplicates",
            CheckType::Completeness => "completeness",
            CheckType::Freshness => "freshness",
        }
    }

    pub fn template_name(&self) -> String {
        format!("{}.yml", self.as_str())
    }

    /// Folder of the checks repository holding this kind of check.
    pub fn folder_name(&self) -> &'static str {
        match self {
            CheckType::Duplicates => "uniqueness",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values substituted into a check template.
///
/// Required fields are optional here so that an incomplete configuration
/// can be reported field by field instead of failing at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_interval: Option<String>,

    /// Extra template variables (e.g. `date_column` for completeness).
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl CheckConfig {
    pub const REQUIRED_FIELDS: [&'static str; 5] =
        ["name", "description", "table", "column_name", "table_fqdn"];

    fn field(&self, key: &str) -> Option<&String> {
        match key {
            "name" => self.name.as_ref(),
            "description" => self.description.as_ref(),
            "table" => self.table.as_ref(),
            "column_name" => self.column_name.as_ref(),
            "table_fqdn" => self.table_fqdn.as_ref(),
            "freshness_interval" => self.freshness_interval.as_ref(),
            "schedule_interval" => self.schedule_interval.as_ref(),
            other => self.extra.get(other),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::REQUIRED_FIELDS
            .into_iter()
            .filter(|key| self.field(key).is_none())
            .collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ))
        }
    }

    /// Copy with every string value lowercased.
    pub fn normalized(&self) -> Self {
        let lower = |v: &Option<String>| v.as_ref().map(|s| s.to_lowercase());
        Self {
            name: lower(&self.name),
            description: lower(&self.description),
            table: lower(&self.table),
            table_fqdn: lower(&self.table_fqdn),
            column_name: lower(&self.column_name),
            freshness_interval: lower(&self.freshness_interval),
            schedule_interval: lower(&self.schedule_interval),
            extra: self
                .extra
                .iter()
                .map(|(k, v)| (k.clone(), v.to_lowercase()))
                .collect(),
        }
    }
}

/// `database.schema.table`, lowercased.
pub fn create_table_fqdn(database: &str, schema: &str, table: &str) -> String {
    format!(
        "{}.{}.{}",
        database.to_lowercase(),
        schema.to_lowercase(),
        table.to_lowercase()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCheck {
    #[serde(rename = "type")]
    pub check_type: CheckType,
    pub content: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete() -> CheckConfig {
        CheckConfig {
            name: Some("Fact_Test duplicate check".into()),
            description: Some("Check for duplicates".into()),
            table: Some("Fact_Test".into()),
            table_fqdn: Some("DB.Schema.Fact_Test".into()),
            column_name: Some("ID".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_complete_config() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_named_exactly() {
        let cfg = CheckConfig {
            table: None,
            table_fqdn: None,
            ..complete()
        };
        match cfg.validate() {
            Err(DomainError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["table", "table_fqdn"])
            }
            other => panic!("Expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_normalized_lowercases_every_string() {
        let mut cfg = complete();
        cfg.extra.insert("date_column".into(), "Loaded_AT".into());
        let n = cfg.normalized();
        assert_eq!(n.table.as_deref(), Some("fact_test"));
        assert_eq!(n.table_fqdn.as_deref(), Some("db.schema.fact_test"));
        assert_eq!(n.column_name.as_deref(), Some("id"));
        assert_eq!(n.extra["date_column"], "loaded_at");
    }

    #[test]
    fn test_create_table_fqdn() {
        assert_eq!(
            create_table_fqdn("TEST_DB", "Test_Schema", "Fact_Test"),
            "test_db.test_schema.fact_test"
        );
    }

    #[test]
    fn test_folder_names() {
        assert_eq!(CheckType::Duplicates.folder_name(), "uniqueness");
        assert_eq!(CheckType::Completeness.folder_name(), "completeness");
        assert_eq!(CheckType::Freshness.folder_name(), "freshness");
    }
}
