//! User-facing output for pdfvol.
//!
//! Status lines go through [`OutputFormatter`]; the helpers here print the
//! listings shared by the command line and the interactive session.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter, OutputTarget};

use std::path::Path;

use crate::plan::MergePlan;
use crate::source::SourceFile;

/// Print the ordered source listing, numbered from 1.
pub fn display_file_list(formatter: &OutputFormatter, folder: &Path, files: &[SourceFile]) {
    formatter.section(&format!(
        "Found {} PDF file(s) in '{}':",
        files.len(),
        folder.display()
    ));
    for (i, file) in files.iter().enumerate() {
        formatter.list_item(i + 1, &file.file_name());
    }
}

/// Print the outputs a plan will create.
pub fn display_plan(formatter: &OutputFormatter, plan: &MergePlan) {
    formatter.section(&format!("Will create {} merged file(s):", plan.len()));
    for (i, job) in plan.jobs.iter().enumerate() {
        formatter.info(&format!(
            "  Group {}: {} ({} file(s), #{}-#{})",
            i + 1,
            job.output_name,
            job.sources.len(),
            job.first_position,
            job.last_position
        ));
    }
}
