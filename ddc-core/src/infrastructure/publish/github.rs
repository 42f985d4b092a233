// ddc-core/src/infrastructure/publish/github.rs

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("ddc/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize, PartialEq)]
pub struct PullRequestPayload {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
    pub draft: bool,
}

impl PullRequestPayload {
    pub fn new(branch: &str, title: &str, base: &str, draft: bool) -> Self {
        Self {
            title: title.to_string(),
            body: format!(
                "Add DDC checks for {}\n\nGenerated using dbt-ddc-generator",
                branch
            ),
            head: branch.to_string(),
            base: base.to_string(),
            draft,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    html_url: String,
}

/// Minimal client for `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    repository: String,
    token: String,
}

impl GitHubClient {
    pub fn new(repository: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: GITHUB_API.to_string(),
            repository: repository.into(),
            token: token.into(),
        }
    }

    /// GitHub Enterprise or a test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn pulls_url(&self) -> String {
        format!("{}/repos/{}/pulls", self.api_base, self.repository)
    }

    #[instrument(skip(self, payload), fields(head = %payload.head))]
    pub async fn create_pull_request(
        &self,
        payload: &PullRequestPayload,
    ) -> Result<String, InfrastructureError> {
        let response = self
            .http
            .post(self.pulls_url())
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.token))
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let created: PullRequestResponse = response.json().await?;
        info!(url = %created.html_url, "Pull request created");
        Ok(created.html_url)
    }
}
