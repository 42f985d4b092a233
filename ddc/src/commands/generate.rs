// ddc/src/commands/generate.rs
//
// USE CASE: Render the checks of one model, to stdout or to a directory.

use anyhow::Context;
use std::path::PathBuf;

use ddc_core::application::Generator;
use ddc_core::infrastructure::publish::CheckWriter;

use crate::cli::ProjectArgs;
use crate::commands::files_table;

pub fn execute(
    model: String,
    env: String,
    output_dir: Option<PathBuf>,
    project: ProjectArgs,
) -> anyhow::Result<()> {
    let generator = Generator::new(&project.settings()).context("Failed to initialize generator")?;

    let bundle = generator
        .generate_bundle(&model, &env)
        .with_context(|| format!("Failed to generate checks for '{}' ({})", model, env))?;

    match output_dir {
        None => {
            for check in &bundle.checks {
                println!("# --- {} ---", check.check_type);
                print!("{}", check.content);
            }
        }
        Some(dir) => {
            let writer = CheckWriter::new(dir);
            let report = writer.write_to_files(
                &bundle.table,
                &bundle.checks,
                &bundle.database,
                &bundle.schema,
            )?;

            println!("🧪 Checks for {} ({})", bundle.table_fqdn, env);
            println!("{}", files_table(&report));
            if !report.any_written() {
                println!("✨ Nothing new: every check file already exists.");
            }
        }
    }

    Ok(())
}
