// ddc/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing::Level;

use cli::{Cli, Commands};
use ddc_core::application::PublishRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env of the working directory, if any, feeds the clap `env` fallbacks
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // 1. Setup Logging (Tracing), on stderr so that stdout stays pipeable
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        // --- USE CASE: GENERATE ---
        Commands::Generate {
            model,
            env,
            output_dir,
            project,
        } => commands::generate::execute(model, env, output_dir, project),

        // --- USE CASE: PUBLISH ---
        Commands::Publish {
            models,
            env,
            branch,
            pr,
            title,
            project,
            repository,
        } => {
            let request = PublishRequest {
                models,
                environment: env,
                branch,
                create_pr: pr,
                title,
            };
            commands::publish::execute(request, project, repository).await
        }

        Commands::Version => commands::version::execute(),
    }
}
