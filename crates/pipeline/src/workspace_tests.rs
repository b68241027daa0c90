// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use futures_util::stream;

#[tokio::test]
async fn write_lines_counts_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input_endpoints.txt");
    let items = stream::iter(vec![
        Ok("https://a.example.com/".to_string()),
        Ok("https://b.example.com/login".to_string()),
    ]);
    let count = write_lines(&path, items).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(count_lines(&path).unwrap(), 2);
}

#[tokio::test]
async fn stage_dirs_nest_under_the_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let stage = ensure_stage_dir(dir.path(), ScanStage::VulnScan).await.unwrap();
    assert!(stage.ends_with("vuln_scan"));
    assert!(stage.is_dir());
}

#[tokio::test]
async fn read_output_lines_skips_blanks_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "a.example.com\n\n  \nb.example.com\n").unwrap();
    let lines = read_output_lines(&path).await.unwrap();
    assert_eq!(lines, vec!["a.example.com", "b.example.com"]);

    let missing = dir.path().join("nope.txt");
    assert!(read_output_lines(&missing).await.unwrap().is_empty());
}
