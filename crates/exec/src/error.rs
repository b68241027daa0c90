// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor error taxonomy.

use thiserror::Error;

/// Failures launching or supervising an external tool.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    #[error("{tool} timed out after {timeout_secs}s (ran {elapsed_secs:.2}s)")]
    Timeout {
        tool: String,
        timeout_secs: u64,
        elapsed_secs: f64,
    },

    #[error("{tool} failed to spawn: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stream worker exited without reporting an outcome")]
    OutcomeLost,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
