// ddc/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).
// Every path / credential flag falls back to an environment variable
// (a `.env` file is loaded before parsing).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ddc_core::infrastructure::config::settings::{
    DEFAULT_BASE_BRANCH, DEFAULT_PROFILE_NAMESPACE, GeneratorSettings, PublishSettings,
};

pub const DEFAULT_ENVIRONMENT: &str = "local";

#[derive(Parser)]
#[command(name = "ddc")]
#[command(about = "Generates data-quality checks (duplicates, completeness, freshness) for dbt models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logs
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧪 Renders the checks of one model (stdout, or files with --output-dir)
    Generate {
        /// dbt model name (`fact_orders` or `finance/fact_orders`)
        model: String,

        /// Target environment (selects the `<profile>_<env>` output)
        #[arg(long, short, default_value = DEFAULT_ENVIRONMENT)]
        env: String,

        /// Write the check files under this directory instead of printing them
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        project: ProjectArgs,
    },

    /// 🚀 Writes the checks into the checks repository, commits, pushes and optionally opens a PR
    Publish {
        /// One or more dbt model names
        #[arg(required = true)]
        models: Vec<String>,

        #[arg(long, short, default_value = DEFAULT_ENVIRONMENT)]
        env: String,

        /// Branch to create or reuse (default: `ddc/<model>`)
        #[arg(long)]
        branch: Option<String>,

        /// Open a pull request once pushed
        #[arg(long)]
        pr: bool,

        /// Pull request title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        repository: RepositoryArgs,
    },

    /// Prints the version
    Version,
}

/// Where the dbt project, its profiles and the templates live.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Root of the dbt project (contains `models/` and `scheduling/`)
    #[arg(long, env = "DDC_DBT_DIRECTORY")]
    pub dbt_dir: PathBuf,

    /// Directory holding profiles.yml (default: the dbt directory)
    #[arg(long, env = "DDC_PROFILES_DIRECTORY")]
    pub profiles_dir: Option<PathBuf>,

    /// Directory holding duplicates.yml, completeness.yml and freshness.yml
    #[arg(long, env = "DDC_TEMPLATES_DIRECTORY", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Top-level key of profiles.yml
    #[arg(long, env = "DDC_PROFILE_NAMESPACE", default_value = DEFAULT_PROFILE_NAMESPACE)]
    pub profile_namespace: String,
}

impl ProjectArgs {
    pub fn settings(&self) -> GeneratorSettings {
        let profiles_dir = self
            .profiles_dir
            .clone()
            .unwrap_or_else(|| self.dbt_dir.clone());
        GeneratorSettings::new(&self.dbt_dir, profiles_dir, &self.templates_dir)
            .with_profile_namespace(&self.profile_namespace)
    }
}

/// The repository receiving the check files.
#[derive(Args, Debug, Clone)]
pub struct RepositoryArgs {
    /// Local clone of the checks repository
    #[arg(long, env = "DDC_CHECKS_DIRECTORY")]
    pub checks_dir: PathBuf,

    /// GitHub repository (`owner/name`) used to open pull requests
    #[arg(long, env = "DDC_GITHUB_REPOSITORY")]
    pub github_repository: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "DDC_BASE_BRANCH", default_value = DEFAULT_BASE_BRANCH)]
    pub base_branch: String,

    /// Open the pull request ready for review instead of as a draft
    #[arg(long)]
    pub ready: bool,
}

impl RepositoryArgs {
    pub fn settings(&self) -> PublishSettings {
        let mut settings = PublishSettings::new(&self.checks_dir);
        settings.github_repository = self.github_repository.clone();
        settings.github_token = self.github_token.clone();
        settings.base_branch = self.base_branch.clone();
        settings.draft = !self.ready;
        settings
    }
}
