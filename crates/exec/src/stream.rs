// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream-mode command execution.
//!
//! The worker task owns the child process for its whole life. Consumers
//! hold a [`CommandStream`]: a line receiver plus a cancellation drop
//! guard. Whatever way the consumer exits, the guard fires, the worker
//! kills the process group, writes the log footer and reports the final
//! outcome.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::admission::{self, CommandSlot};
use crate::executor::{kill_process_group, reap_with_grace};
use crate::logfile::CommandLog;
use crate::sanitize::clean_line;
use crate::{ExecConfig, ExecError, ExecOutcome};

/// Parameters for a streaming run.
#[derive(Debug, Clone)]
pub struct StreamRequest {
    pub tool: String,
    pub command: String,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
    /// Trailing character stripped from every line (e.g. a FQDN dot).
    pub suffix_char: Option<char>,
    pub log_file: Option<PathBuf>,
}

impl StreamRequest {
    pub fn new(tool: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            command: command.into(),
            cwd: None,
            timeout: None,
            suffix_char: None,
            log_file: None,
        }
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn suffix_char(mut self, c: char) -> Self {
        self.suffix_char = Some(c);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

/// Live handle on a streaming command.
pub struct CommandStream {
    lines: mpsc::Receiver<String>,
    outcome: oneshot::Receiver<Result<ExecOutcome, ExecError>>,
    // Dropped (with the stream) to cancel the worker and kill the child.
    _cancel: tokio_util::sync::DropGuard,
}

impl CommandStream {
    /// Next sanitized stdout line; `None` once the stream is exhausted.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Stop consuming and collect the final outcome. Kills the child
    /// first if it is still running.
    pub async fn finish(self) -> Result<ExecOutcome, ExecError> {
        let CommandStream {
            lines,
            outcome,
            _cancel,
        } = self;
        drop(lines);
        drop(_cancel);
        outcome.await.unwrap_or(Err(ExecError::OutcomeLost))
    }
}

/// How the read loop ended.
enum StreamEnd {
    Eof,
    TimedOut,
    Cancelled,
    ReadFailed(std::io::Error),
}

pub(crate) fn spawn_stream_worker(cfg: ExecConfig, request: StreamRequest) -> CommandStream {
    let (line_tx, line_rx) = mpsc::channel(256);
    let (outcome_tx, outcome_rx) = oneshot::channel();
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();

    tokio::spawn(async move {
        let result = stream_worker(cfg, request, line_tx, token).await;
        // Consumer may already be gone; the outcome is then uninteresting.
        let _ = outcome_tx.send(result);
    });

    CommandStream {
        lines: line_rx,
        outcome: outcome_rx,
        _cancel: guard,
    }
}

async fn stream_worker(
    cfg: ExecConfig,
    request: StreamRequest,
    line_tx: mpsc::Sender<String>,
    token: CancellationToken,
) -> Result<ExecOutcome, ExecError> {
    // Admission may block for a while; honor cancellation during it.
    tokio::select! {
        _ = admission::wait_for_capacity(&cfg) => {}
        _ = token.cancelled() => {
            return Err(ExecError::InvalidArg("cancelled before launch".into()));
        }
    }
    let _slot = CommandSlot::acquire(&request.tool);

    let mut log = match &request.log_file {
        Some(path) => Some(
            CommandLog::create(
                path,
                &request.tool,
                &request.command,
                request.timeout,
                cfg.command_logging,
            )
            .await?,
        ),
        None => None,
    };

    let stderr = match &log {
        Some(log) => Stdio::from(log.std_handle()?),
        None => Stdio::null(),
    };

    let start = Instant::now();
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c")
        .arg(&request.command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(stderr)
        .process_group(0);
    if let Some(dir) = &request.cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        tool: request.tool.clone(),
        source,
    })?;
    let pid = child.id();

    let stdout = match child.stdout.take() {
        Some(out) => out,
        None => {
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
            return Err(ExecError::InvalidArg("child stdout not captured".into()));
        }
    };
    let mut reader = BufReader::new(stdout).lines();

    let timeout_at = request.timeout.map(|t| tokio::time::Instant::now() + t);
    let timeout_fut = async {
        match timeout_at {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(timeout_fut);

    let end = loop {
        tokio::select! {
            _ = token.cancelled() => break StreamEnd::Cancelled,
            _ = &mut timeout_fut => break StreamEnd::TimedOut,
            line = reader.next_line() => match line {
                Ok(Some(raw)) => {
                    let Some(clean) = clean_line(&raw, request.suffix_char) else {
                        continue;
                    };
                    if let Some(log) = log.as_mut() {
                        let _ = log.append_line(&clean).await;
                    }
                    if line_tx.send(clean).await.is_err() {
                        // Receiver dropped without cancelling first.
                        break StreamEnd::Cancelled;
                    }
                }
                Ok(None) => break StreamEnd::Eof,
                Err(e) => break StreamEnd::ReadFailed(e),
            },
        }
    };

    // Finalize: the child must be gone before we report anything.
    let timed_out = matches!(end, StreamEnd::TimedOut);
    match &end {
        StreamEnd::Eof => {}
        StreamEnd::TimedOut => {
            tracing::warn!(
                tool = %request.tool,
                timeout_s = request.timeout.map(|t| t.as_secs()).unwrap_or(0),
                "streaming command timed out, killing process group"
            );
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
        }
        StreamEnd::Cancelled => {
            tracing::info!(tool = %request.tool, "stream consumer gone, cleaning up process");
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
        }
        StreamEnd::ReadFailed(e) => {
            tracing::warn!(tool = %request.tool, error = %e, "stdout read failed");
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
        }
    }

    let exit_code = reap_with_grace(&mut child, pid).await;
    let duration = start.elapsed();
    let success = !timed_out && exit_code == 0;

    if let Some(log) = log.as_mut() {
        log.footer(duration, exit_code, success).await?;
    }

    if timed_out {
        return Err(ExecError::Timeout {
            tool: request.tool,
            timeout_secs: request.timeout.map(|t| t.as_secs()).unwrap_or(0),
            elapsed_secs: duration.as_secs_f64(),
        });
    }

    Ok(ExecOutcome {
        success,
        exit_code,
        duration,
        log_file: request.log_file,
    })
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
