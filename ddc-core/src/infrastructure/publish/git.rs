// ddc-core/src/infrastructure/publish/git.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::error::DdcError;
use crate::infrastructure::config::settings::PublishSettings;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::publish::github::{GitHubClient, PullRequestPayload};
use crate::ports::VersionControl;

/// The checks repository: a local git clone plus, optionally, its GitHub remote.
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
    base_branch: String,
    commit_message: String,
    draft: bool,
    github: Option<GitHubClient>,
}

impl GitRepository {
    pub fn new(settings: &PublishSettings) -> Self {
        let github = match (&settings.github_repository, &settings.github_token) {
            (Some(repo), Some(token)) => Some(GitHubClient::new(repo, token)),
            _ => None,
        };

        Self {
            workdir: settings.checks_directory.clone(),
            base_branch: settings.base_branch.clone(),
            commit_message: settings.commit_message.clone(),
            draft: settings.draft,
            github,
        }
    }

    pub fn with_github(mut self, client: GitHubClient) -> Self {
        self.github = Some(client);
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Runs `git <args>` in the repository and returns trimmed stdout.
    async fn git(&self, args: &[&str]) -> Result<String, InfrastructureError> {
        debug!(?args, "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await?;

        if !output.status.success() {
            return Err(InfrastructureError::Git(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub async fn branch_exists(&self, branch: &str) -> Result<bool, InfrastructureError> {
        let listed = self.git(&["branch", "--list", branch]).await?;
        Ok(!listed.is_empty())
    }

    pub async fn current_branch(&self) -> Result<String, InfrastructureError> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await
    }
}

#[async_trait]
impl VersionControl for GitRepository {
    #[instrument(skip(self))]
    async fn create_branch(&self, branch: &str) -> Result<(), DdcError> {
        if self.branch_exists(branch).await? {
            info!("Using existing branch");
            self.git(&["checkout", branch]).await?;
            return Ok(());
        }

        info!(base = %self.base_branch, "Updating base branch");
        self.git(&["fetch", "origin"]).await?;
        self.git(&["checkout", &self.base_branch]).await?;
        self.git(&["pull", "origin", &self.base_branch]).await?;

        info!("Creating new branch");
        self.git(&["checkout", "-b", branch]).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn commit_and_push(&self, branch: &str) -> Result<(), DdcError> {
        info!("Committing changes");
        self.git(&["add", "."]).await?;
        self.git(&["commit", "-m", &self.commit_message]).await?;

        info!("Pushing branch to remote");
        self.git(&["push", "-u", "origin", branch]).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_pull_request(&self, branch: &str, title: &str) -> Result<String, DdcError> {
        let client = self.github.as_ref().ok_or_else(|| {
            InfrastructureError::ConfigError(
                "Pull requests need a GitHub repository slug and GITHUB_TOKEN".into(),
            )
        })?;

        let payload = PullRequestPayload::new(branch, title, &self.base_branch, self.draft);
        Ok(client.create_pull_request(&payload).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;
    use tempfile::{TempDir, tempdir};

    fn git_available() -> bool {
        StdCommand::new("git").arg("--version").output().is_ok()
    }

    fn run(dir: &Path, args: &[&str]) {
        let status = StdCommand::new("git")
            .args(["-c", "user.name=ddc", "-c", "user.email=ddc@example.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(status.status.success(), "git {:?} failed: {:?}", args, status);
    }

    /// Bare `origin` + clone on `master` with one commit.
    fn repo_with_origin() -> (TempDir, GitRepository) {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin.git");
        let work = tmp.path().join("work");
        std::fs::create_dir_all(&origin).unwrap();
        std::fs::create_dir_all(&work).unwrap();

        run(&origin, &["init", "--bare", "-q"]);
        run(&work, &["init", "-q"]);
        run(&work, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        run(&work, &["config", "user.name", "ddc"]);
        run(&work, &["config", "user.email", "ddc@example.com"]);
        std::fs::write(work.join("README.md"), "checks\n").unwrap();
        run(&work, &["add", "."]);
        run(&work, &["commit", "-q", "-m", "init"]);
        run(&work, &["remote", "add", "origin", origin.to_str().unwrap()]);
        run(&work, &["push", "-q", "-u", "origin", "master"]);

        let repo = GitRepository::new(&PublishSettings::new(&work));
        (tmp, repo)
    }

    #[tokio::test]
    async fn test_create_branch_then_commit_and_push() {
        if !git_available() {
            return;
        }
        let (_tmp, repo) = repo_with_origin();

        repo.create_branch("ddc/fact_test").await.unwrap();
        assert_eq!(repo.current_branch().await.unwrap(), "ddc/fact_test");

        std::fs::write(repo.workdir().join("check.yml"), "formatVersion: 1\n").unwrap();
        repo.commit_and_push("ddc/fact_test").await.unwrap();

        let remote = repo
            .git(&["ls-remote", "--heads", "origin", "ddc/fact_test"])
            .await
            .unwrap();
        assert!(remote.contains("refs/heads/ddc/fact_test"));
    }

    #[tokio::test]
    async fn test_existing_branch_is_reused() {
        if !git_available() {
            return;
        }
        let (_tmp, repo) = repo_with_origin();
        run(repo.workdir(), &["branch", "ddc/existing"]);

        repo.create_branch("ddc/existing").await.unwrap();
        assert_eq!(repo.current_branch().await.unwrap(), "ddc/existing");
    }

    #[tokio::test]
    async fn test_git_failure_is_reported() {
        if !git_available() {
            return;
        }
        let tmp = tempdir().unwrap();
        let repo = GitRepository::new(&PublishSettings::new(tmp.path()));
        let err = repo.create_branch("anything").await.unwrap_err();
        assert!(err.to_string().contains("git branch --list"));
    }

    #[tokio::test]
    async fn test_pull_request_needs_github_settings() {
        let tmp = tempdir().unwrap();
        let repo = GitRepository::new(&PublishSettings::new(tmp.path()));
        let err = repo.create_pull_request("b", "t").await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_pull_request_goes_through_configured_client() {
        let (base, request) = crate::infrastructure::publish::github::mock::serve_once(
            "201 Created",
            r#"{"html_url":"https://github.com/acme/checks/pull/1"}"#,
        )
        .await;

        let tmp = tempdir().unwrap();
        let mut settings = PublishSettings::new(tmp.path());
        settings.base_branch = "main".into();
        let repo = GitRepository::new(&settings)
            .with_github(crate::infrastructure::publish::github::mock::client(&base));

        let url = repo.create_pull_request("ddc/fact_test", "Add checks").await.unwrap();
        assert_eq!(url, "https://github.com/acme/checks/pull/1");

        let request = request.await.unwrap();
        assert!(request.contains(r#""base":"main""#));
        assert!(request.contains(r#""title":"Add checks""#));
    }
}
