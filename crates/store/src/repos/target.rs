// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target repository.

use crate::StoreError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use xr_core::{TargetId, TargetKind};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TargetRow {
    pub id: i64,
    pub name: String,
    pub target_type: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TargetRow {
    pub fn target_id(&self) -> TargetId {
        TargetId::new(self.id)
    }
}

#[derive(Clone)]
pub struct TargetRepo {
    pool: PgPool,
}

impl TargetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, kind: TargetKind) -> Result<TargetRow, StoreError> {
        let row = sqlx::query_as::<_, TargetRow>(
            "INSERT INTO target (name, target_type) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get(&self, id: TargetId) -> Result<TargetRow, StoreError> {
        sqlx::query_as::<_, TargetRow>(
            "SELECT * FROM target WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("target {id}")))
    }

    /// Soft delete; cascading row removal runs in a fleet delete task.
    pub async fn soft_delete(&self, ids: &[TargetId]) -> Result<u64, StoreError> {
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let result = sqlx::query(
            "UPDATE target SET deleted_at = now() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(&raw)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Hard delete; asset rows go with the target via FK cascade.
    pub async fn purge(&self, ids: &[i64]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM target WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
