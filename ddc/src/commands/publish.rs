// ddc/src/commands/publish.rs
//
// USE CASE: Generate checks, write them in the checks repository and ship them.

use anyhow::Context;

use ddc_core::application::{Generator, PublishRequest, publish};
use ddc_core::infrastructure::publish::{CheckWriter, GitRepository};

use crate::cli::{ProjectArgs, RepositoryArgs};
use crate::commands::files_table;

pub async fn execute(
    request: PublishRequest,
    project: ProjectArgs,
    repository: RepositoryArgs,
) -> anyhow::Result<()> {
    let generator = Generator::new(&project.settings()).context("Failed to initialize generator")?;

    let publish_settings = repository.settings();
    publish_settings.check()?;
    if request.create_pr
        && (publish_settings.github_repository.is_none() || publish_settings.github_token.is_none())
    {
        anyhow::bail!(
            "❌ --pr needs a GitHub repository (--github-repository / DDC_GITHUB_REPOSITORY) and GITHUB_TOKEN"
        );
    }

    let writer = CheckWriter::new(&publish_settings.checks_directory);
    let git = GitRepository::new(&publish_settings);

    println!(
        "🚀 Publishing {} model(s) to {}",
        request.models.len(),
        publish_settings.checks_directory.display()
    );

    let report = publish(&generator, &writer, &git, &request).await?;

    for model in &report.published {
        println!("\n📦 {} -> {}", model.model, model.table_fqdn);
        println!("{}", files_table(&model.files));
    }
    for failed in &report.failed {
        eprintln!("⚠️  Skipped {}: {}", failed.model, failed.reason);
    }

    if report.committed {
        println!("\n✅ Changes pushed to branch: {}", report.branch);
    } else {
        println!("\n✨ Nothing to commit on {}: every check file already exists.", report.branch);
    }
    if let Some(url) = &report.pull_request {
        println!("🔗 Pull Request created: {}", url);
    }

    Ok(())
}
