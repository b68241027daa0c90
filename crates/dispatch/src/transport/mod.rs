// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution transports: local shell and single-use SSH sessions.

mod local;
mod ssh;

pub use local::run_local;
pub use ssh::{exec_remote, SshExecOutput, SSH_CONNECT_TIMEOUT};

use crate::DispatchError;
use xr_store::WorkerRow;

/// Run a docker command on the worker and return the trimmed first line
/// of stdout (the detached container id).
pub async fn launch_container(worker: &WorkerRow, docker_cmd: &str) -> Result<String, DispatchError> {
    tracing::info!(
        worker = %worker.name,
        is_local = worker.is_local,
        command_head = %docker_cmd.chars().take(200).collect::<String>(),
        "launching task container"
    );

    let output = if worker.is_local {
        run_local(docker_cmd).await?
    } else {
        let result = exec_remote(
            &worker.ip_address,
            worker.ssh_port as u16,
            &worker.username,
            &worker.password,
            docker_cmd,
        )
        .await?;
        if result.exit_status != 0 {
            return Err(DispatchError::Exec {
                exit_code: result.exit_status as i32,
                stderr: result.stderr,
            });
        }
        result.stdout
    };

    let container_id = output.lines().next().unwrap_or("").trim().to_string();
    tracing::info!(
        worker = %worker.name,
        container = %container_id.chars().take(12).collect::<String>(),
        "task container started"
    );
    Ok(container_id)
}
