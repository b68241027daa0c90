// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-use SSH exec transport.
//!
//! One connection per command: connect (10 s budget), password auth,
//! exec, drain output, disconnect. Host keys are auto-accepted — workers
//! are provisioned by the deploy flow, not discovered.

use crate::DispatchError;
use async_trait::async_trait;
use russh::client::{self, Config};
use russh::{ChannelMsg, Disconnect};
use std::sync::Arc;
use std::time::Duration;

/// Budget for TCP connect + SSH handshake.
pub const SSH_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SshExecOutput {
    pub exit_status: u32,
    pub stdout: String,
    pub stderr: String,
}

struct AcceptAllHostKeys;

#[async_trait]
impl client::Handler for AcceptAllHostKeys {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh_keys::key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Execute one command on a remote worker.
pub async fn exec_remote(
    host: &str,
    port: u16,
    username: &str,
    password: &str,
    command: &str,
) -> Result<SshExecOutput, DispatchError> {
    let config = Arc::new(Config {
        inactivity_timeout: Some(Duration::from_secs(300)),
        ..Config::default()
    });

    let mut session = tokio::time::timeout(
        SSH_CONNECT_TIMEOUT,
        client::connect(config, (host, port), AcceptAllHostKeys),
    )
    .await
    .map_err(|_| DispatchError::Transport(format!("ssh connect to {host}:{port} timed out")))?
    .map_err(|e| DispatchError::Transport(format!("ssh connect to {host}:{port} failed: {e}")))?;

    let authenticated = session
        .authenticate_password(username, password)
        .await
        .map_err(|e| DispatchError::Auth(format!("auth error for {username}@{host}: {e}")))?;
    if !authenticated {
        return Err(DispatchError::Auth(format!(
            "password rejected for {username}@{host}"
        )));
    }
    tracing::debug!(host, port, "ssh session established");

    let mut channel = session
        .channel_open_session()
        .await
        .map_err(|e| DispatchError::Transport(format!("ssh channel open failed: {e}")))?;
    channel
        .exec(true, command)
        .await
        .map_err(|e| DispatchError::Transport(format!("ssh exec failed: {e}")))?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut exit_status = None;

    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
            ChannelMsg::ExtendedData { ref data, ext: 1 } => stderr.extend_from_slice(data),
            ChannelMsg::ExitStatus { exit_status: code } => exit_status = Some(code),
            _ => {}
        }
    }

    let _ = session
        .disconnect(Disconnect::ByApplication, "", "en")
        .await;

    Ok(SshExecOutput {
        // A session torn down before reporting a status is a failure.
        exit_status: exit_status.unwrap_or(255),
        stdout: String::from_utf8_lossy(&stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
    })
}
