//! Renumbering volume files on disk.

use std::fs;

use pdfvol::rename::{RenamePattern, execute_renames, list_names, plan_renames};

use crate::common::file_names;

#[tokio::test]
async fn test_shift_two_volumes_by_two() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("卷1.pdf"), "first").unwrap();
    fs::write(dir.path().join("卷2.pdf"), "second").unwrap();
    fs::write(dir.path().join("cover.pdf"), "cover").unwrap();

    let names = list_names(dir.path()).await.unwrap();
    let plan = plan_renames(&names, &RenamePattern::default(), 2);
    let report = execute_renames(dir.path(), &plan.ops, false).await;

    assert!(report.failed.is_empty());
    assert_eq!(file_names(dir.path()), ["cover.pdf", "卷3.pdf", "卷4.pdf"]);
    assert_eq!(fs::read_to_string(dir.path().join("卷3.pdf")).unwrap(), "first");
    assert_eq!(fs::read_to_string(dir.path().join("卷4.pdf")).unwrap(), "second");
}

#[tokio::test]
async fn test_shift_across_width_boundary() {
    let dir = tempfile::TempDir::new().unwrap();
    for n in 8..=10 {
        fs::write(dir.path().join(format!("卷{n}.pdf")), n.to_string()).unwrap();
    }

    let names = list_names(dir.path()).await.unwrap();
    let plan = plan_renames(&names, &RenamePattern::default(), 2);
    let report = execute_renames(dir.path(), &plan.ops, false).await;

    assert!(report.failed.is_empty());
    for (n, original) in [(10, 8), (11, 9), (12, 10)] {
        let content = fs::read_to_string(dir.path().join(format!("卷{n}.pdf"))).unwrap();
        assert_eq!(content, original.to_string());
    }
}

#[tokio::test]
async fn test_custom_pattern_and_negative_offset() {
    let dir = tempfile::TempDir::new().unwrap();
    for name in ["vol_03.txt", "vol_04.txt", "vol_05.pdf"] {
        fs::write(dir.path().join(name), name).unwrap();
    }

    let pattern = RenamePattern::new("vol_", ".txt")
        .unwrap()
        .with_keep_width(true);
    let names = list_names(dir.path()).await.unwrap();
    let plan = plan_renames(&names, &pattern, -2);
    let report = execute_renames(dir.path(), &plan.ops, false).await;

    assert!(report.failed.is_empty());
    assert_eq!(
        file_names(dir.path()),
        ["vol_01.txt", "vol_02.txt", "vol_05.pdf"]
    );
}
