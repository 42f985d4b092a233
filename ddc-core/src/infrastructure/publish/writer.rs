// ddc-core/src/infrastructure/publish/writer.rs

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::domain::check::{CheckType, GeneratedCheck};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::create_new_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WriteStatus {
    Created,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenCheck {
    pub check_type: CheckType,
    pub path: PathBuf,
    pub status: WriteStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    pub files: Vec<WrittenCheck>,
}

impl WriteReport {
    pub fn any_written(&self) -> bool {
        self.files.iter().any(|f| f.status == WriteStatus::Created)
    }

    pub fn created(&self) -> impl Iterator<Item = &WrittenCheck> {
        self.files.iter().filter(|f| f.status == WriteStatus::Created)
    }
}

/// Places generated checks inside the checks repository:
///
/// `<root>/<db>/<schema>/<folder>/<db>_<schema>_<model>_<type>.yml`
#[derive(Debug, Clone)]
pub struct CheckWriter {
    root: PathBuf,
}

impl CheckWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn check_path(
        &self,
        model_name: &str,
        check_type: CheckType,
        database: &str,
        schema: &str,
    ) -> PathBuf {
        let database = format_identifier(database);
        let schema = format_identifier(schema);
        self.root
            .join(&database)
            .join(&schema)
            .join(check_type.folder_name())
            .join(format!(
                "{}_{}_{}_{}.yml",
                database, schema, model_name, check_type
            ))
    }

    /// Existing files are skipped, never overwritten.
    #[instrument(skip(self, checks))]
    pub fn write_to_files(
        &self,
        model_name: &str,
        checks: &[GeneratedCheck],
        database: &str,
        schema: &str,
    ) -> Result<WriteReport, InfrastructureError> {
        let mut report = WriteReport::default();

        for check in checks {
            let path = self.check_path(model_name, check.check_type, database, schema);
            let status = if create_new_atomic(&path, &check.content)? {
                info!(path = ?path, "Created check file");
                WriteStatus::Created
            } else {
                info!(path = ?path, "Skipped check file (already exists)");
                WriteStatus::Skipped
            };
            report.files.push(WrittenCheck {
                check_type: check.check_type,
                path,
                status,
            });
        }

        Ok(report)
    }
}

fn format_identifier(value: &str) -> String {
    value.replace('-', "_").to_lowercase()
}
