// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wordlist repository.
//!
//! Registering a wordlist reads the backing file once to record its size,
//! line count and SHA-256 — the hash lets workers validate cached copies
//! without re-downloading.

use crate::StoreError;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use std::path::Path;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WordlistRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub file_path: String,
    pub file_size: i64,
    pub line_count: i32,
    pub file_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct WordlistRepo {
    pool: PgPool,
}

impl WordlistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register (or refresh) a wordlist from a file on disk.
    pub async fn register_file(
        &self,
        name: &str,
        description: &str,
        path: &Path,
    ) -> Result<WordlistRow, StoreError> {
        let contents = tokio::fs::read(path).await?;
        let file_size = contents.len() as i64;
        let line_count = contents.iter().filter(|&&b| b == b'\n').count() as i32;
        let file_hash = format!("{:x}", Sha256::digest(&contents));

        let row = sqlx::query_as::<_, WordlistRow>(
            "INSERT INTO wordlist (name, description, file_path, file_size, line_count, file_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description, \
             file_path = EXCLUDED.file_path, file_size = EXCLUDED.file_size, \
             line_count = EXCLUDED.line_count, file_hash = EXCLUDED.file_hash, \
             updated_at = now() \
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(path.display().to_string())
        .bind(file_size)
        .bind(line_count)
        .bind(&file_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<WordlistRow, StoreError> {
        sqlx::query_as::<_, WordlistRow>("SELECT * FROM wordlist WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("wordlist {name}")))
    }
}
