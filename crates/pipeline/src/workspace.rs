// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan workspace layout.
//!
//! One directory per stage under the scan workspace: `input_*.txt`
//! exports, `<tool>_<timestamp>.log` command logs, and per-tool output
//! files for the wait-mode tools.

use crate::PipelineError;
use futures_util::{Stream, StreamExt};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use xr_core::ScanStage;
use xr_store::StoreError;

pub fn stage_dir(workspace: &Path, stage: ScanStage) -> PathBuf {
    workspace.join(stage.as_str())
}

pub async fn ensure_stage_dir(workspace: &Path, stage: ScanStage) -> Result<PathBuf, PipelineError> {
    let dir = stage_dir(workspace, stage);
    tokio::fs::create_dir_all(&dir).await?;
    Ok(dir)
}

/// `<tool>_<timestamp>.log` inside the stage directory.
pub fn tool_log_path(stage_dir: &Path, tool: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    stage_dir.join(format!("{tool}_{stamp}.log"))
}

/// Drain an export stream into a line file; returns the line count.
pub async fn write_lines(
    path: &Path,
    stream: impl Stream<Item = Result<String, StoreError>>,
) -> Result<u64, PipelineError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut count = 0u64;
    futures_util::pin_mut!(stream);
    while let Some(line) = stream.next().await {
        let line = line?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        count += 1;
    }
    file.flush().await?;
    Ok(count)
}

/// Non-empty line count of a file on disk.
pub fn count_lines(path: &Path) -> std::io::Result<u64> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut count = 0u64;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

/// Read a tool output file as trimmed non-empty lines.
pub async fn read_output_lines(path: &Path) -> Result<Vec<String>, PipelineError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
