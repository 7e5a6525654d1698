//! Failures that abort a run before anything is written.

use std::path::Path;

use pdfvol::PdfVolError;
use pdfvol::config::{MergeConfig, NamingMode};
use pdfvol::merge::{ExecuteOptions, execute_plan};
use pdfvol::output::OutputFormatter;
use pdfvol::plan::MergePlan;
use pdfvol::source::collect_sources;

use crate::common::{file_names, folder_with};

#[test]
fn test_missing_folder() {
    let err = collect_sources(Path::new("/nonexistent/pdfvol/folder"), "pdf").unwrap_err();
    assert!(matches!(err, PdfVolError::FolderNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_empty_folder_plans_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let files = collect_sources(dir.path(), "pdf").unwrap();
    assert!(files.is_empty());

    let config = MergeConfig::batch(dir.path(), 3, NamingMode::Range);
    let err = MergePlan::from_config(&files, &config).unwrap_err();
    assert!(matches!(err, PdfVolError::NoFilesToMerge));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_start_past_end() {
    let dir = folder_with(&["e1.pdf", "e2.pdf"]);
    let files = collect_sources(dir.path(), "pdf").unwrap();
    let config = MergeConfig::single(dir.path(), 3, None, NamingMode::Range);

    let err = MergePlan::from_config(&files, &config).unwrap_err();
    assert!(matches!(err, PdfVolError::IndexOutOfRange { .. }));
}

#[test]
fn test_zero_group_size() {
    let dir = folder_with(&["z1.pdf"]);
    let files = collect_sources(dir.path(), "pdf").unwrap();
    let config = MergeConfig::batch(dir.path(), 0, NamingMode::Range);

    let err = MergePlan::from_config(&files, &config).unwrap_err();
    assert!(matches!(err, PdfVolError::InvalidConfig { .. }));
}

#[tokio::test]
async fn test_all_sources_broken_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("r1.pdf"), b"garbage").unwrap();
    std::fs::write(dir.path().join("r2.pdf"), b"garbage").unwrap();

    let files = collect_sources(dir.path(), "pdf").unwrap();
    let config = MergeConfig::single(dir.path(), 1, None, NamingMode::Range);
    let plan = MergePlan::from_config(&files, &config).unwrap();

    let summary = execute_plan(
        &plan,
        dir.path(),
        &ExecuteOptions::default(),
        &OutputFormatter::quiet(),
    )
    .await
    .unwrap();

    assert_eq!(summary.failed, 1);
    assert!(summary.into_result().is_err());
    assert_eq!(file_names(dir.path()), ["r1.pdf", "r2.pdf"]);
}
