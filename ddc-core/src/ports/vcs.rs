// ddc-core/src/ports/vcs.rs

// What publishing needs from a checks repository, without knowing it is git + GitHub.

use crate::error::DdcError;
use async_trait::async_trait;

#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Checks out `branch`, creating it from the base branch when it does not exist yet.
    async fn create_branch(&self, branch: &str) -> Result<(), DdcError>;

    /// Stages everything, commits and pushes `branch` to `origin`.
    async fn commit_and_push(&self, branch: &str) -> Result<(), DdcError>;

    /// Opens a pull request for `branch` and returns its URL.
    async fn create_pull_request(&self, branch: &str, title: &str) -> Result<String, DdcError>;
}
