// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-command log files: header, teed output, footer.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::MAX_LOG_TAIL_LINES;

const RULE: &str = "============================================================";

/// Open handle on a command log file.
pub(crate) struct CommandLog {
    path: PathBuf,
    file: tokio::fs::File,
    /// When false, only raw stderr lands in the file (wired at spawn);
    /// header, footer and teed stdout are skipped.
    verbose: bool,
}

impl CommandLog {
    /// Create (truncate) the log file and write the start header.
    pub(crate) async fn create(
        path: &Path,
        tool: &str,
        command: &str,
        timeout: Option<Duration>,
        verbose: bool,
    ) -> std::io::Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await?;

        if verbose {
            let mut header = format!("$ {command}\n{RULE}\n# Tool: {tool}\n");
            header.push_str(&format!(
                "# Started: {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ));
            if let Some(t) = timeout {
                header.push_str(&format!("# Timeout: {}s\n", t.as_secs()));
            }
            header.push_str(&format!("# Status: running...\n{RULE}\n\n"));
            file.write_all(header.as_bytes()).await?;
            file.flush().await?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            verbose,
        })
    }

    /// Reopen the file as a blocking handle for child stdio redirection.
    pub(crate) fn std_handle(&self) -> std::io::Result<std::fs::File> {
        std::fs::OpenOptions::new().append(true).open(&self.path)
    }

    /// Append one already-sanitized output line.
    pub(crate) async fn append_line(&mut self, line: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.file.write_all(line.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        self.file.flush().await
    }

    /// Append the end footer.
    pub(crate) async fn footer(
        &mut self,
        duration: Duration,
        exit_code: i32,
        success: bool,
    ) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        let status = if success { "\u{2713} ok" } else { "\u{2717} failed" };
        let footer = format!(
            "\n{RULE}\n# Finished: {}\n# Duration: {:.2}s\n# Exit code: {exit_code}\n# Status: {status}\n{RULE}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            duration.as_secs_f64(),
        );
        self.file.write_all(footer.as_bytes()).await?;
        self.file.flush().await
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

/// Read the last `max_lines` lines of a log file for failure reports.
///
/// Best-effort: unreadable or missing files produce an empty string, not
/// an error, so failure reporting never masks the original failure.
pub fn read_log_tail(path: &Path, max_lines: usize) -> String {
    let mut contents = String::new();
    let Ok(mut file) = std::fs::File::open(path) else {
        return String::new();
    };
    if file.read_to_string(&mut contents).is_err() {
        return String::new();
    }

    let lines: Vec<&str> = contents.lines().collect();
    let start = lines.len().saturating_sub(max_lines.min(MAX_LOG_TAIL_LINES));
    lines[start..].join("\n")
}

#[cfg(test)]
#[path = "logfile_tests.rs"]
mod tests;
