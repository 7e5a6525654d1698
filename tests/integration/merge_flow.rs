//! End-to-end merges: scan, plan, execute, then read the outputs back.

use pdfvol::config::{MergeConfig, NamingMode};
use pdfvol::io::PdfReader;
use pdfvol::merge::{ExecuteOptions, execute_plan};
use pdfvol::output::OutputFormatter;
use pdfvol::plan::MergePlan;
use pdfvol::source::collect_sources;

use crate::common::{file_names, folder_with, page_texts, write_pdf};

async fn merge(config: &MergeConfig) -> pdfvol::Result<pdfvol::merge::BatchSummary> {
    let files = collect_sources(&config.folder, &config.extension)?;
    let plan = MergePlan::from_config(&files, config)?;
    execute_plan(
        &plan,
        &config.folder,
        &ExecuteOptions::default(),
        &OutputFormatter::quiet(),
    )
    .await
}

#[tokio::test]
async fn test_batch_merge_in_groups_of_two() {
    let dir = folder_with(&["a1.pdf", "a2.pdf", "a3.pdf"]);
    let config = MergeConfig::batch(dir.path(), 2, NamingMode::Range);

    let summary = merge(&config).await.unwrap();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 0);

    let names = file_names(dir.path());
    assert!(names.contains(&"001-002.pdf".to_string()));
    assert!(names.contains(&"003-003.pdf".to_string()));

    let reader = PdfReader::new();
    let first = reader.load(&dir.path().join("001-002.pdf")).await.unwrap();
    let second = reader.load(&dir.path().join("003-003.pdf")).await.unwrap();
    assert_eq!(first.page_count, 2);
    assert_eq!(second.page_count, 1);
}

#[tokio::test]
async fn test_numeric_order_beats_alphabetical() {
    let dir = tempfile::TempDir::new().unwrap();
    write_pdf(&dir.path().join("part10.pdf"), "ten", 1);
    write_pdf(&dir.path().join("part2.pdf"), "two", 2);
    write_pdf(&dir.path().join("part1.pdf"), "one", 1);

    let config = MergeConfig::single(dir.path(), 1, None, NamingMode::Range);
    merge(&config).await.unwrap();

    let texts = page_texts(&dir.path().join("001-010.pdf"));
    assert_eq!(texts.len(), 4);
    assert!(texts[0].contains("one p0"));
    assert!(texts[1].contains("two p0"));
    assert!(texts[2].contains("two p1"));
    assert!(texts[3].contains("ten p0"));
}

#[tokio::test]
async fn test_volume_naming_in_batch() {
    let dir = folder_with(&["x1.pdf", "x2.pdf", "x3.pdf", "x4.pdf"]);
    let config = MergeConfig {
        volume: Some(5),
        ..MergeConfig::batch(dir.path(), 2, NamingMode::Volume)
    };

    merge(&config).await.unwrap();

    let names = file_names(dir.path());
    assert!(names.contains(&"卷5.pdf".to_string()));
    assert!(names.contains(&"卷6.pdf".to_string()));
}

#[tokio::test]
async fn test_single_range_with_explicit_name() {
    let dir = folder_with(&["s1.pdf", "s2.pdf", "s3.pdf", "s4.pdf"]);
    let config = MergeConfig {
        output_name: Some("middle".to_string()),
        ..MergeConfig::single(dir.path(), 2, Some(2), NamingMode::Range)
    };

    merge(&config).await.unwrap();

    let texts = page_texts(&dir.path().join("middle.pdf"));
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("s2"));
    assert!(texts[1].contains("s3"));
}

#[tokio::test]
async fn test_default_naming_uses_positions() {
    let dir = folder_with(&["c07.pdf", "c08.pdf", "c09.pdf"]);
    let config = MergeConfig::single(dir.path(), 2, None, NamingMode::Default);

    merge(&config).await.unwrap();

    assert!(file_names(dir.path()).contains(&"merged_2-3.pdf".to_string()));
}

#[tokio::test]
async fn test_broken_source_is_skipped() {
    let dir = folder_with(&["b1.pdf", "b3.pdf"]);
    std::fs::write(dir.path().join("b2.pdf"), b"not a pdf").unwrap();

    let config = MergeConfig::single(dir.path(), 1, None, NamingMode::Custom);
    let summary = merge(&config).await.unwrap();
    assert_eq!(summary.succeeded, 1);

    let texts = page_texts(&dir.path().join("合并版_001-003.pdf"));
    assert_eq!(texts.len(), 2);
}
