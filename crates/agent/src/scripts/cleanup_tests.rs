// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn expiry_compares_against_retention_window() {
    let now = SystemTime::now();
    let eight_days_ago = now - Duration::from_secs(8 * 24 * 60 * 60);
    let yesterday = now - Duration::from_secs(24 * 60 * 60);

    assert!(is_expired(now, eight_days_ago, 7));
    assert!(!is_expired(now, yesterday, 7));
    // Clock skew (mtime in the future) never expires anything.
    assert!(!is_expired(eight_days_ago, now, 7));
}

#[tokio::test]
async fn missing_results_dir_is_a_noop() {
    run("/nonexistent/results", 7).await.unwrap();
}

#[tokio::test]
async fn only_directories_are_considered() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stray.log"), "x").unwrap();
    std::fs::create_dir(dir.path().join("scan_1_fresh")).unwrap();

    run(dir.path().to_str().unwrap(), 7).await.unwrap();
    assert!(dir.path().join("stray.log").exists());
    assert!(dir.path().join("scan_1_fresh").exists());
}
