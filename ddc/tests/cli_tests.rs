use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A copy of the fixture dbt project plus the shipped templates in a temp dir.
struct DdcTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl DdcTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let workspace = crate_dir.parent().context("Workspace root not found")?;

        let root = tmp.path().to_path_buf();
        Self::copy_dir(&crate_dir.join("tests/fixtures/dbt_project"), &root.join("dbt"))?;
        Self::copy_dir(&workspace.join("templates"), &root.join("templates"))?;

        Ok(Self { _tmp: tmp, root })
    }

    fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    /// `ddc` running in the project root, with settings passed through the environment.
    fn ddc(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ddc"));
        cmd.current_dir(&self.root)
            .env("DDC_DBT_DIRECTORY", self.root.join("dbt"))
            .env_remove("DDC_PROFILES_DIRECTORY")
            .env_remove("DDC_TEMPLATES_DIRECTORY")
            .env_remove("DDC_PROFILE_NAMESPACE")
            .env_remove("DDC_CHECKS_DIRECTORY")
            .env_remove("DDC_GITHUB_REPOSITORY")
            .env_remove("DDC_BASE_BRANCH")
            .env_remove("GITHUB_TOKEN");
        cmd
    }

    fn count_files(&self, dir: &Path) -> usize {
        walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .count()
    }
}

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(["-c", "user.name=ddc", "-c", "user.email=ddc@example.com"])
        .args(args)
        .current_dir(dir)
        .output()?;
    anyhow::ensure!(output.status.success(), "git {:?} failed: {:?}", args, output);
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[test]
fn test_generate_prints_three_checks() -> Result<()> {
    let env = DdcTestEnv::new()?;

    env.ddc()
        .args(["generate", "fact_test", "--env", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# --- duplicates ---"))
        .stdout(predicate::str::contains("# --- completeness ---"))
        .stdout(predicate::str::contains("# --- freshness ---"))
        .stdout(predicate::str::contains("from finance-db.data_mart.fact_test"))
        .stdout(predicate::str::contains("group by order_id"))
        .stdout(predicate::str::contains("where order_placed_at > current_timestamp - interval '24h'"))
        .stdout(predicate::str::contains("every: 6h"))
        .stdout(predicate::str::contains("FINANCE-DB").not());
    Ok(())
}

#[test]
fn test_generate_defaults_to_local_environment() -> Result<()> {
    let env = DdcTestEnv::new()?;

    env.ddc()
        .args(["generate", "fact_test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sandbox.dev_finance.fact_test"));
    Ok(())
}

#[test]
fn test_generate_to_output_dir_never_overwrites() -> Result<()> {
    let env = DdcTestEnv::new()?;
    let out = env.root.join("out");

    env.ddc()
        .args(["generate", "fact_test", "--env", "prod", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let duplicates = out.join("finance_db/data_mart/uniqueness/finance_db_data_mart_fact_test_duplicates.yml");
    assert!(duplicates.is_file());
    assert_eq!(env.count_files(&out), 3);

    std::fs::write(&duplicates, "hand edited\n")?;

    env.ddc()
        .args(["generate", "fact_test", "--env", "prod", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing new"));

    assert_eq!(std::fs::read_to_string(&duplicates)?, "hand edited\n");
    Ok(())
}

#[test]
fn test_generate_unknown_model_fails() -> Result<()> {
    let env = DdcTestEnv::new()?;

    env.ddc()
        .args(["generate", "does_not_exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model file not found for: does_not_exist"));
    Ok(())
}

#[test]
fn test_generate_unknown_environment_fails() -> Result<()> {
    let env = DdcTestEnv::new()?;

    env.ddc()
        .args(["generate", "fact_test", "--env", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No database/schema found for model 'fact_test' in environment 'staging'",
        ));
    Ok(())
}

#[test]
fn test_model_without_profile_target_fails_despite_broken_sibling() -> Result<()> {
    let env = DdcTestEnv::new()?;

    // The pipeline is found next to a malformed document; the profile is what's missing
    env.ddc()
        .args(["generate", "dim_campaign", "--env", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("marketing_prod"));
    Ok(())
}

#[test]
fn test_missing_dbt_directory_is_reported() -> Result<()> {
    let env = DdcTestEnv::new()?;

    env.ddc()
        .env("DDC_DBT_DIRECTORY", env.root.join("nowhere"))
        .args(["generate", "fact_test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings"));
    Ok(())
}

#[test]
fn test_version() -> Result<()> {
    let env = DdcTestEnv::new()?;

    env.ddc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ddc version "));
    Ok(())
}

#[test]
fn test_publish_commits_and_pushes_to_checks_repository() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let env = DdcTestEnv::new()?;

    // Bare origin + clone on master
    let origin = env.root.join("origin.git");
    let checks = env.root.join("checks");
    std::fs::create_dir_all(&origin)?;
    std::fs::create_dir_all(&checks)?;
    git(&origin, &["init", "--bare", "-q"])?;
    git(&checks, &["init", "-q"])?;
    git(&checks, &["symbolic-ref", "HEAD", "refs/heads/master"])?;
    git(&checks, &["config", "user.name", "ddc"])?;
    git(&checks, &["config", "user.email", "ddc@example.com"])?;
    std::fs::write(checks.join("README.md"), "checks\n")?;
    git(&checks, &["add", "."])?;
    git(&checks, &["commit", "-q", "-m", "init"])?;
    git(&checks, &["remote", "add", "origin", &origin.to_string_lossy()])?;
    git(&checks, &["push", "-q", "-u", "origin", "master"])?;

    env.ddc()
        .env("DDC_CHECKS_DIRECTORY", &checks)
        .args(["publish", "fact_test", "dim_campaign", "--env", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes pushed to branch: ddc/fact_test-and-1-more"))
        .stderr(predicate::str::contains("Skipped dim_campaign"));

    let pushed = git(&checks, &["ls-remote", "--heads", "origin"])?;
    assert!(pushed.contains("refs/heads/ddc/fact_test-and-1-more"));
    assert!(checks
        .join("finance_db/data_mart/freshness/finance_db_data_mart_fact_test_freshness.yml")
        .is_file());

    // Same run again: branch reused, nothing to commit
    env.ddc()
        .env("DDC_CHECKS_DIRECTORY", &checks)
        .args(["publish", "fact_test", "--branch", "ddc/fact_test-and-1-more", "--env", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to commit"));
    Ok(())
}

#[test]
fn test_publish_pr_requires_github_settings() -> Result<()> {
    let env = DdcTestEnv::new()?;
    let checks = env.root.join("checks");
    std::fs::create_dir_all(&checks)?;

    env.ddc()
        .env("DDC_CHECKS_DIRECTORY", &checks)
        .args(["publish", "fact_test", "--pr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
    Ok(())
}
