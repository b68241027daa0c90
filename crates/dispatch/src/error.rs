// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch error taxonomy. Auth, transport and command failure are
//! distinct: callers report them differently and only transport-class
//! failures are worth retrying on another worker.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no worker available")]
    NoWorker,

    #[error("ssh authentication failed: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("command failed with exit {exit_code}: {stderr}")]
    Exec { exit_code: i32, stderr: String },

    #[error(transparent)]
    Store(#[from] xr_store::StoreError),

    #[error(transparent)]
    Liveness(#[from] xr_core::LivenessError),
}
