//! Merge execution.
//!
//! [`Merger`] concatenates one list of sources; [`execute_plan`] runs every
//! job of a [`MergePlan`] and writes each output into the source folder.
//! Jobs run one after another. A failing job is reported and the rest of
//! the plan still runs.

pub mod merger;

pub use merger::{MergeResult, MergeStatistics, Merger, SkippedSource};

use std::path::{Path, PathBuf};

use crate::error::{PdfVolError, Result};
use crate::io::{PdfWriter, WriteOptions, WriteStatistics};
use crate::output::OutputFormatter;
use crate::plan::{MergeJob, MergePlan};

/// How a plan is executed.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Report the plan without loading or writing anything.
    pub dry_run: bool,

    /// Options for writing each output.
    pub write: WriteOptions,
}

/// Outcome of one written output.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Where the output was written.
    pub output: PathBuf,

    /// Sources merged into it.
    pub files_merged: usize,

    /// Sources skipped because they failed to load.
    pub files_skipped: usize,

    /// Pages in the output.
    pub total_pages: usize,

    /// Size and timing of the write.
    pub write: WriteStatistics,
}

/// Tally of a plan execution.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Jobs that produced an output (or would have, in a dry run).
    pub succeeded: usize,

    /// Jobs that failed.
    pub failed: usize,

    /// Paths written, in job order.
    pub outputs: Vec<PathBuf>,
}

impl BatchSummary {
    /// Total number of jobs attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Turn a summary with failures into an error.
    pub fn into_result(self) -> Result<Self> {
        if self.failed > 0 {
            return Err(PdfVolError::merge_failed(format!(
                "{} of {} output file(s) could not be created",
                self.failed,
                self.total()
            )));
        }
        Ok(self)
    }
}

/// Merge the sources of one job and write the output into `folder`.
///
/// Nothing is written when no source can be loaded.
pub async fn run_job(job: &MergeJob, folder: &Path, writer: &PdfWriter) -> Result<(JobReport, MergeResult)> {
    let result = Merger::new().merge(&job.sources).await?;

    let output = folder.join(&job.output_name);
    let write = writer.save_with_stats(&result.document, &output).await?;

    let report = JobReport {
        output,
        files_merged: result.statistics.files_merged,
        files_skipped: result.statistics.files_skipped,
        total_pages: result.statistics.total_pages,
        write,
    };
    Ok((report, result))
}

/// Run every job of `plan`, writing outputs into `folder`.
///
/// # Errors
///
/// Returns `NoFilesToMerge` for an empty plan. Failures of individual jobs
/// are reported through `formatter` and counted in the summary.
pub async fn execute_plan(
    plan: &MergePlan,
    folder: &Path,
    options: &ExecuteOptions,
    formatter: &OutputFormatter,
) -> Result<BatchSummary> {
    if plan.is_empty() {
        return Err(PdfVolError::NoFilesToMerge);
    }

    let writer = PdfWriter::with_options(options.write.clone());
    let mut summary = BatchSummary::default();

    for job in &plan.jobs {
        formatter.section("Merging:");
        for source in &job.sources {
            formatter.bullet(&display_name(source));
        }

        if options.dry_run {
            formatter.info(&format!("  Would create: {}", job.output_name));
            summary.succeeded += 1;
            continue;
        }

        match run_job(job, folder, &writer).await {
            Ok((report, result)) => {
                for skipped in &result.skipped {
                    formatter.warning(&format!(
                        "Skipped {}: {}",
                        display_name(&skipped.path),
                        skipped.error
                    ));
                }
                formatter.success(&format!(
                    "Created {} ({} file(s), {} page(s))",
                    job.output_name, report.files_merged, report.total_pages
                ));
                formatter.detail("Input size", &result.statistics.format_input_size());
                formatter.detail(
                    "Merge time",
                    &format!("{:.2}s", result.statistics.merge_time.as_secs_f64()),
                );
                formatter.detail("Output size", &report.write.format_file_size());
                formatter.detail(
                    "Write time",
                    &format!("{:.2}s", report.write.write_time.as_secs_f64()),
                );
                formatter.debug(&format!(
                    "Wrote {} ({} bytes)",
                    report.output.display(),
                    report.write.file_size
                ));
                summary.succeeded += 1;
                summary.outputs.push(report.output);
            }
            Err(err) => {
                formatter.error(&format!("Failed to create {}: {err}", job.output_name));
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
