// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage error type.

use thiserror::Error;

/// Failures in the durable store. Batch-level failures are retriable by
/// the caller: a failed batch rolled back completely.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("row not found: {0}")]
    NotFound(String),

    #[error("invalid stored value: {0}")]
    InvalidValue(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
