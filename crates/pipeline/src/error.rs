// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline error taxonomy.
//!
//! Localize what can be localized: a malformed line is a debug log, a
//! failed tool is a recorded result, and only configuration errors and
//! storage failures travel upward.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("scan cancelled")]
    Cancelled,

    #[error(transparent)]
    Exec(#[from] xr_exec::ExecError),

    #[error(transparent)]
    Store(#[from] xr_store::StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
