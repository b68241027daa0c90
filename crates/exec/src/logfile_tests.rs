// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn header_and_footer_bracket_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subfinder_20260801_120000.log");

    let mut log = CommandLog::create(
        &path,
        "subfinder",
        "subfinder -d example.com",
        Some(Duration::from_secs(300)),
        true,
    )
    .await
    .unwrap();
    log.append_line("www.example.com").await.unwrap();
    log.footer(Duration::from_secs_f64(1.5), 0, true).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("$ subfinder -d example.com\n"));
    assert!(contents.contains("# Tool: subfinder"));
    assert!(contents.contains("# Timeout: 300s"));
    assert!(contents.contains("www.example.com\n"));
    assert!(contents.contains("# Exit code: 0"));
    assert!(contents.contains("\u{2713} ok"));
}

#[tokio::test]
async fn quiet_mode_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiet.log");

    let mut log = CommandLog::create(&path, "naabu", "naabu -json", None, false)
        .await
        .unwrap();
    log.append_line("ignored").await.unwrap();
    log.footer(Duration::from_secs(1), 1, false).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.is_empty());
}

#[test]
fn tail_caps_line_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.log");
    let body: Vec<String> = (0..50).map(|i| format!("line-{i}")).collect();
    std::fs::write(&path, body.join("\n")).unwrap();

    let tail = read_log_tail(&path, 10);
    assert_eq!(tail.lines().count(), 10);
    assert!(tail.starts_with("line-40"));
    assert!(tail.ends_with("line-49"));
}

#[test]
fn tail_of_missing_file_is_empty() {
    assert_eq!(read_log_tail(std::path::Path::new("/nonexistent/x.log"), 10), "");
}
