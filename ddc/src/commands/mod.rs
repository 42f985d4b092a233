// ddc/src/commands/mod.rs

pub mod generate;
pub mod publish;
pub mod version;

use comfy_table::Table;
use ddc_core::infrastructure::publish::{WriteReport, WriteStatus};

/// One row per check file: type, status, path.
pub(crate) fn files_table(report: &WriteReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Check", "Status", "File"]);
    for file in &report.files {
        let status = match file.status {
            WriteStatus::Created => "created",
            WriteStatus::Skipped => "skipped (already exists)",
        };
        table.add_row(vec![
            file.check_type.to_string(),
            status.to_string(),
            file.path.display().to_string(),
        ]);
    }
    table
}
