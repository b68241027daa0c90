// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cleanup entrypoint: delete scan workspace directories older than the
//! retention window.

use std::path::Path;
use std::time::{Duration, SystemTime};

pub async fn run(results_dir: &str, retention_days: u32) -> anyhow::Result<()> {
    let results_dir = Path::new(results_dir);
    if !results_dir.is_dir() {
        tracing::warn!(dir = %results_dir.display(), "results directory missing, nothing to clean");
        return Ok(());
    }

    let now = SystemTime::now();
    let mut removed = 0u64;
    let mut kept = 0u64;
    let mut entries = tokio::fs::read_dir(results_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let modified = entry.metadata().await.and_then(|m| m.modified()).ok();
        let expired = modified
            .map(|m| is_expired(now, m, retention_days))
            .unwrap_or(false);
        if expired {
            match tokio::fs::remove_dir_all(&path).await {
                Ok(()) => {
                    tracing::info!(dir = %path.display(), "removed expired scan workspace");
                    removed += 1;
                }
                Err(e) => {
                    tracing::warn!(dir = %path.display(), error = %e, "failed to remove workspace");
                }
            }
        } else {
            kept += 1;
        }
    }

    tracing::info!(removed, kept, retention_days, "cleanup finished");
    Ok(())
}

fn is_expired(now: SystemTime, modified: SystemTime, retention_days: u32) -> bool {
    let retention = Duration::from_secs(u64::from(retention_days) * 24 * 60 * 60);
    now.duration_since(modified)
        .map(|age| age > retention)
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;
