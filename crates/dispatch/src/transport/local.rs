// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local shell transport.

use crate::DispatchError;

/// Run a command through the local shell, capturing stdout.
pub async fn run_local(command: &str) -> Result<String, DispatchError> {
    let output = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .await
        .map_err(|e| DispatchError::Transport(format!("local exec failed: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::error!(
            exit = output.status.code().unwrap_or(-1),
            stderr = %stderr.chars().take(500).collect::<String>(),
            "local docker command failed"
        );
        return Err(DispatchError::Exec {
            exit_code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
