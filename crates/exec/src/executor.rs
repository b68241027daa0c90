// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wait-mode command execution.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use crate::admission::{self, CommandSlot};
use crate::logfile::CommandLog;
use crate::stream::{spawn_stream_worker, CommandStream, StreamRequest};
use crate::{ExecConfig, ExecError, GRACEFUL_SHUTDOWN_TIMEOUT};

/// Result of a completed (or timed-out-and-reaped) command.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    pub success: bool,
    pub exit_code: i32,
    pub duration: Duration,
    pub log_file: Option<PathBuf>,
}

/// Launches external tools through a shell with load admission, log
/// teeing and process-group cleanup.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    cfg: ExecConfig,
}

impl CommandExecutor {
    pub fn new(cfg: ExecConfig) -> Self {
        Self { cfg }
    }

    pub fn from_env() -> Self {
        Self::new(ExecConfig::from_env())
    }

    /// Run `command` under `sh -c`, waiting up to `timeout` for completion.
    ///
    /// Suited to tools that write results to an output file. Stdout and
    /// stderr are teed to `log_file` when command logging is on; a timeout
    /// kills the whole process group and surfaces as [`ExecError::Timeout`].
    pub async fn execute_and_wait(
        &self,
        tool: &str,
        command: &str,
        timeout: Duration,
        log_file: Option<&Path>,
    ) -> Result<ExecOutcome, ExecError> {
        if tool.is_empty() {
            return Err(ExecError::InvalidArg("tool name is empty".into()));
        }
        if command.is_empty() {
            return Err(ExecError::InvalidArg("command is empty".into()));
        }
        if timeout.is_zero() {
            return Err(ExecError::InvalidArg(format!(
                "timeout must be positive, got {timeout:?}"
            )));
        }

        tracing::info!(tool, "starting scan tool");
        admission::wait_for_capacity(&self.cfg).await;
        let _slot = CommandSlot::acquire(tool);

        let mut log = match log_file {
            Some(path) => Some(
                CommandLog::create(path, tool, command, Some(timeout), self.cfg.command_logging)
                    .await?,
            ),
            None => None,
        };

        let (stdout, stderr) = match &log {
            Some(log) if self.cfg.command_logging => {
                let out = log.std_handle()?;
                let err = log.std_handle()?;
                (Stdio::from(out), Stdio::from(err))
            }
            // Errors-only mode: stdout discarded, raw stderr kept.
            Some(log) => (Stdio::null(), Stdio::from(log.std_handle()?)),
            None => (Stdio::null(), Stdio::null()),
        };

        let start = Instant::now();
        let mut child = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .process_group(0)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                tool: tool.to_string(),
                source,
            })?;
        let pid = child.id();

        let wait = tokio::time::timeout(timeout, child.wait()).await;
        let duration = start.elapsed();

        match wait {
            Ok(Ok(status)) => {
                let exit_code = status.code().unwrap_or(-1);
                let success = status.success();
                if let Some(log) = log.as_mut() {
                    log.footer(duration, exit_code, success).await?;
                }
                if success {
                    tracing::info!(tool, elapsed_s = %format_args!("{:.2}", duration.as_secs_f64()), "scan tool finished");
                } else {
                    tracing::warn!(
                        tool,
                        exit_code,
                        elapsed_s = %format_args!("{:.2}", duration.as_secs_f64()),
                        "scan tool returned non-zero status"
                    );
                    if let Some(log) = &log {
                        let tail = crate::logfile::read_log_tail(log.path(), crate::MAX_LOG_TAIL_LINES);
                        if !tail.is_empty() {
                            tracing::debug!(tool, tail = %tail, "tool error output");
                        }
                    }
                }
                Ok(ExecOutcome {
                    success,
                    exit_code,
                    duration,
                    log_file: log.map(|l| l.path().to_path_buf()),
                })
            }
            Ok(Err(source)) => {
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                Err(ExecError::Spawn {
                    tool: tool.to_string(),
                    source,
                })
            }
            Err(_elapsed) => {
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                reap_with_grace(&mut child, pid).await;
                if let Some(log) = log.as_mut() {
                    log.footer(duration, -1, false).await?;
                }
                tracing::error!(
                    tool,
                    timeout_s = timeout.as_secs(),
                    elapsed_s = %format_args!("{:.2}", duration.as_secs_f64()),
                    "scan tool timed out"
                );
                Err(ExecError::Timeout {
                    tool: tool.to_string(),
                    timeout_secs: timeout.as_secs(),
                    elapsed_secs: duration.as_secs_f64(),
                })
            }
        }
    }

    /// Start `command` and return a stream of sanitized stdout lines.
    ///
    /// Suited to tools that emit one result per line (JSON or plain).
    /// Dropping the stream — consumer done, consumer failed, task
    /// cancelled — kills the process group; the worker always writes the
    /// log footer and releases its admission slot.
    pub fn execute_stream(&self, request: StreamRequest) -> CommandStream {
        spawn_stream_worker(self.cfg.clone(), request)
    }
}

/// SIGKILL an entire process group. The child was spawned as group
/// leader, so its pid doubles as the pgid.
pub(crate) fn kill_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        Ok(()) => tracing::debug!(pgid = pid, "killed process group"),
        Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pgid = pid, error = %e, "killpg failed"),
    }
}

/// Wait for a killed child to be reaped, forcing another group kill if it
/// lingers past the grace period.
pub(crate) async fn reap_with_grace(child: &mut tokio::process::Child, pid: Option<u32>) -> i32 {
    match tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, child.wait()).await {
        Ok(Ok(status)) => status.code().unwrap_or(-1),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "wait on killed child failed");
            -1
        }
        Err(_elapsed) => {
            if let Some(pid) = pid {
                kill_process_group(pid);
            }
            -2
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
