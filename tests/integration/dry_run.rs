//! Dry runs report the plan and leave the folder untouched.

use pdfvol::config::{MergeConfig, NamingMode};
use pdfvol::merge::{ExecuteOptions, execute_plan};
use pdfvol::output::OutputFormatter;
use pdfvol::plan::MergePlan;
use pdfvol::source::collect_sources;

use crate::common::{file_names, folder_with};

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let dir = folder_with(&["d1.pdf", "d2.pdf", "d3.pdf"]);
    let before = file_names(dir.path());

    let config = MergeConfig {
        dry_run: true,
        ..MergeConfig::batch(dir.path(), 2, NamingMode::Range)
    };
    let files = collect_sources(dir.path(), "pdf").unwrap();
    let plan = MergePlan::from_config(&files, &config).unwrap();

    let options = ExecuteOptions {
        dry_run: true,
        ..ExecuteOptions::default()
    };
    let summary = execute_plan(&plan, dir.path(), &options, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert!(summary.outputs.is_empty());
    assert_eq!(file_names(dir.path()), before);
}

#[test]
fn test_plan_json_lists_outputs() {
    let dir = folder_with(&["j1.pdf", "j2.pdf", "j3.pdf"]);
    let files = collect_sources(dir.path(), "pdf").unwrap();
    let config = MergeConfig::batch(dir.path(), 2, NamingMode::Volume);
    let plan = MergePlan::from_config(&files, &config).unwrap();

    let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
    let jobs = json["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["output_name"], "卷1.pdf");
    assert_eq!(jobs[1]["volume"], 2);
    assert_eq!(jobs[1]["sources"].as_array().unwrap().len(), 1);
}
