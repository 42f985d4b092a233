// ddc-core/src/infrastructure/publish/mod.rs

pub mod git;
pub mod github;
pub mod writer;

pub use git::GitRepository;
pub use github::{GitHubClient, PullRequestPayload};
pub use writer::{CheckWriter, WriteReport, WriteStatus, WrittenCheck};
