// ddc-core/src/application/publish.rs

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::application::generator::Generator;
use crate::domain::error::DomainError;
use crate::error::DdcError;
use crate::infrastructure::publish::writer::{CheckWriter, WriteReport};
use crate::ports::VersionControl;

#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub models: Vec<String>,
    pub environment: String,
    /// Defaults to `ddc/<first model>`.
    pub branch: Option<String>,
    pub create_pr: bool,
    /// Defaults to `Add DDC checks for <models>`.
    pub title: Option<String>,
}

impl PublishRequest {
    pub fn new(models: Vec<String>, environment: impl Into<String>) -> Self {
        Self {
            models,
            environment: environment.into(),
            branch: None,
            create_pr: false,
            title: None,
        }
    }

    pub fn branch_name(&self) -> String {
        if let Some(branch) = &self.branch {
            return branch.clone();
        }
        let first = self
            .models
            .first()
            .map(|m| m.rsplit('/').next().unwrap_or(m))
            .unwrap_or("checks");
        match self.models.len() {
            0 | 1 => format!("ddc/{}", first),
            n => format!("ddc/{}-and-{}-more", first, n - 1),
        }
    }

    pub fn pr_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Add DDC checks for {}", self.models.join(", ")))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishedModel {
    pub model: String,
    pub table_fqdn: String,
    pub files: WriteReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedModel {
    pub model: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub branch: String,
    pub published: Vec<PublishedModel>,
    pub failed: Vec<FailedModel>,
    /// False when every file already existed (nothing to commit).
    pub committed: bool,
    pub pull_request: Option<String>,
}

/// Generates, writes and ships the checks of every requested model.
///
/// Checks are rendered before any git operation so that a model which cannot
/// be resolved never leaves a branch behind. Models that fail are reported
/// and skipped; the run fails only when none succeeded.
#[instrument(skip_all, fields(env = %request.environment, models = request.models.len()))]
pub async fn publish<V>(
    generator: &Generator,
    writer: &CheckWriter,
    vcs: &V,
    request: &PublishRequest,
) -> Result<PublishReport, DdcError>
where
    V: VersionControl + ?Sized,
{
    // ===== 1. GENERATION =====
    let mut bundles = Vec::new();
    let mut failed = Vec::new();
    for model in &request.models {
        match generator.generate_bundle(model, &request.environment) {
            Ok(bundle) => bundles.push(bundle),
            Err(e) => {
                error!(%model, error = %e, "Failed to generate checks");
                failed.push(FailedModel {
                    model: model.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if bundles.is_empty() {
        return Err(DomainError::NothingGenerated(
            failed.iter().map(|f| f.model.clone()).collect(),
        )
        .into());
    }

    // ===== 2. WRITE ON A BRANCH =====
    let branch = request.branch_name();
    vcs.create_branch(&branch).await?;

    let mut published = Vec::new();
    for bundle in bundles {
        let files =
            writer.write_to_files(&bundle.table, &bundle.checks, &bundle.database, &bundle.schema)?;
        published.push(PublishedModel {
            model: bundle.model,
            table_fqdn: bundle.table_fqdn,
            files,
        });
    }

    // ===== 3. COMMIT / PUSH / PR =====
    let committed = published.iter().any(|p| p.files.any_written());
    let mut pull_request = None;

    if committed {
        vcs.commit_and_push(&branch).await?;
        if request.create_pr {
            pull_request = Some(vcs.create_pull_request(&branch, &request.pr_title()).await?);
        }
    } else {
        warn!(%branch, "All check files already exist, nothing to commit");
    }

    info!(
        %branch,
        published = published.len(),
        failed = failed.len(),
        committed,
        "Publish finished"
    );

    Ok(PublishReport {
        branch,
        published,
        failed,
        committed,
        pull_request,
    })
}
