// ddc-core/src/domain/profile.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

// --- CONFIGURATION STRUCTS (profiles.yml) ---

/// `<namespace>:` block of profiles.yml.
///
/// Outputs stay untyped: each one is converted only when it is looked up, so
/// an unusual sibling output never prevents the others from resolving.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProfileNamespace {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub outputs: BTreeMap<String, serde_yaml::Value>,
}

/// One entry of `outputs`, keyed `"{deploy_profile}_{environment}"`.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default, PartialEq)]
pub struct ProfileTarget {
    #[validate(required)]
    #[serde(rename = "type", default)]
    pub output_type: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub database: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub schema: Option<String>,
    #[validate(required)]
    #[serde(default)]
    pub warehouse: Option<String>,
    #[validate(required)]
    #[serde(default)]
    pub role: Option<String>,
    /// A number, or a templated string (`"{{ env_var('DBT_THREADS') | as_number }}"`).
    #[validate(required)]
    #[serde(default)]
    pub threads: Option<serde_yaml::Value>,

    // Credentials (souvent des {{ env_var(...) }})
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_tag: Option<String>,
}

impl ProfileTarget {
    /// `(database, schema)` when both are set and non-empty.
    pub fn location(&self) -> Option<TableLocation> {
        let database = self.database.as_deref().filter(|s| !s.is_empty())?;
        let schema = self.schema.as_deref().filter(|s| !s.is_empty())?;
        Some(TableLocation {
            database: database.to_string(),
            schema: schema.to_string(),
        })
    }
}

pub fn target_key(deploy_profile: &str, environment: &str) -> String {
    format!("{}_{}", deploy_profile, environment)
}

// --- RESOLUTION RESULT ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLocation {
    pub database: String,
    pub schema: String,
}

/// Link of the model -> pipeline -> deploy profile -> target chain that did not resolve.
///
/// This is an ordinary outcome of a lookup, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    NoPipeline,
    NoDeployProfile,
    NoTarget { key: String },
    IncompleteTarget { key: String },
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoPipeline => write!(f, "no pipeline declares the model"),
            Unresolved::NoDeployProfile => write!(f, "pipeline has no 'profile'"),
            Unresolved::NoTarget { key } => write!(f, "profile output '{}' not found", key),
            Unresolved::IncompleteTarget { key } => {
                write!(f, "profile output '{}' lacks database or schema", key)
            }
        }
    }
}
