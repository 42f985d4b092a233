// ddc-core/src/infrastructure/dbt/profiles.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::domain::profile::{ProfileNamespace, ProfileTarget, TableLocation, Unresolved, target_key};
use crate::infrastructure::dbt::scheduling::ScheduleIndex;
use crate::infrastructure::error::InfrastructureError;

/// Resolves `(deploy profile, environment)` to a database/schema using
/// the outputs of one namespace of profiles.yml.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    namespace: String,
    profiles: ProfileNamespace,
    scheduling: ScheduleIndex,
}

impl ProfileResolver {
    /// Loads profiles.yml once. A missing or unparsable file is fatal here;
    /// a missing namespace is not (every lookup then resolves to nothing).
    #[instrument(skip(scheduling))]
    pub fn load(
        profiles_path: &Path,
        namespace: &str,
        scheduling: ScheduleIndex,
    ) -> Result<Self, InfrastructureError> {
        if !profiles_path.is_file() {
            return Err(InfrastructureError::ConfigNotFound(format!(
                "profiles.yml not found at {}",
                profiles_path.display()
            )));
        }

        let content = fs::read_to_string(profiles_path)?;
        let profiles = parse_profiles(&content, namespace)?;
        info!(
            path = ?profiles_path,
            outputs = profiles.outputs.len(),
            "Loaded dbt profiles"
        );

        Ok(Self {
            namespace: namespace.to_string(),
            profiles,
            scheduling,
        })
    }

    /// Target configuration stored under `"{deploy_profile}_{environment}"`.
    ///
    /// `None` when the output is absent or is not a usable target mapping.
    pub fn get_profile_target(&self, deploy_profile: &str, environment: &str) -> Option<ProfileTarget> {
        self.lookup_target(&target_key(deploy_profile, environment)).ok()
    }

    /// model -> pipeline -> deploy profile -> `{profile}_{env}` output -> (database, schema).
    ///
    /// Every broken link is reported as `Unresolved`, never as an error.
    #[instrument(skip(self))]
    pub fn get_database_schema(
        &self,
        model_name: &str,
        environment: &str,
    ) -> Result<TableLocation, Unresolved> {
        let pipeline = self
            .scheduling
            .find_pipeline_config(model_name)
            .ok_or(Unresolved::NoPipeline)?;

        if pipeline.deploy_profile.is_empty() {
            return Err(Unresolved::NoDeployProfile);
        }

        let key = target_key(&pipeline.deploy_profile, environment);
        self.lookup_target(&key)?
            .location()
            .ok_or(Unresolved::IncompleteTarget { key })
    }

    fn lookup_target(&self, key: &str) -> Result<ProfileTarget, Unresolved> {
        let Some(raw) = self.profiles.outputs.get(key) else {
            warn!(%key, namespace = %self.namespace, "Profile target not found");
            return Err(Unresolved::NoTarget { key: key.to_string() });
        };

        serde_yaml::from_value(raw.clone())
            .inspect(|_| debug!(%key, "Found profile target"))
            .map_err(|e| {
                warn!(%key, error = %e, "Profile target is not a usable mapping");
                Unresolved::IncompleteTarget { key: key.to_string() }
            })
    }

    /// All of `type, database, schema, warehouse, role, threads` are present.
    pub fn validate_profile_structure(&self, deploy_profile: &str, environment: &str) -> bool {
        self.get_profile_target(deploy_profile, environment)
            .is_some_and(|t| t.validate().is_ok())
    }
}

fn parse_profiles(content: &str, namespace: &str) -> Result<ProfileNamespace, InfrastructureError> {
    let root: Option<BTreeMap<String, serde_yaml::Value>> = serde_yaml::from_str(content)?;

    match root.and_then(|mut r| r.remove(namespace)) {
        Some(block) => serde_yaml::from_value(block).map_err(|e| {
            InfrastructureError::ConfigError(format!(
                "Invalid '{}' block in profiles.yml: {}",
                namespace, e
            ))
        }),
        None => {
            warn!(%namespace, "Namespace absent from profiles.yml");
            Ok(ProfileNamespace::default())
        }
    }
}
