// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan repository.

use crate::StoreError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use xr_core::{EngineId, ScanId, ScanStage, ScanStatus, TargetId, WorkerId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScanRow {
    pub id: i64,
    pub target_id: i64,
    pub engine_id: i64,
    pub worker_id: Option<i64>,
    pub status: String,
    pub progress: i32,
    pub current_stage: Option<String>,
    pub error_message: String,
    pub scan_workspace_dir: String,
    pub container_ids: Vec<String>,
    pub subdomain_count: i32,
    pub endpoint_count: i32,
    pub vulnerability_count: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ScanRow {
    pub fn scan_id(&self) -> ScanId {
        ScanId::new(self.id)
    }

    pub fn status(&self) -> Result<ScanStatus, StoreError> {
        self.status.parse().map_err(StoreError::InvalidValue)
    }
}

#[derive(Clone)]
pub struct ScanRepo {
    pool: PgPool,
}

impl ScanRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        target_id: TargetId,
        engine_id: EngineId,
        workspace_dir: &str,
    ) -> Result<ScanRow, StoreError> {
        let row = sqlx::query_as::<_, ScanRow>(
            "INSERT INTO scan (target_id, engine_id, scan_workspace_dir) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(target_id.get())
        .bind(engine_id.get())
        .bind(workspace_dir)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get(&self, id: ScanId) -> Result<ScanRow, StoreError> {
        sqlx::query_as::<_, ScanRow>("SELECT * FROM scan WHERE id = $1 AND deleted_at IS NULL")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("scan {id}")))
    }

    /// Soft-deleted scans count as absent: snapshot writes racing a
    /// delete check through here and drop their batch.
    pub async fn exists(&self, id: ScanId) -> Result<bool, StoreError> {
        let (found,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM scan WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    pub async fn set_status(&self, id: ScanId, status: ScanStatus) -> Result<(), StoreError> {
        let stamp = match status {
            ScanStatus::Running => "started_at = now(),",
            s if s.is_terminal() => "stopped_at = now(),",
            _ => "",
        };
        let sql = format!("UPDATE scan SET {stamp} status = $1 WHERE id = $2");
        sqlx::query(&sql)
            .bind(status.as_str())
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_failed(&self, id: ScanId, message: &str) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE scan SET status = 'failed', error_message = $1, stopped_at = now() \
             WHERE id = $2",
        )
        .bind(message)
        .bind(id.get())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_stage(&self, id: ScanId, stage: ScanStage, progress: u8) -> Result<(), StoreError> {
        sqlx::query("UPDATE scan SET current_stage = $1, progress = $2 WHERE id = $3")
            .bind(stage.as_str())
            .bind(progress as i32)
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn assign_worker(
        &self,
        id: ScanId,
        worker_id: WorkerId,
        container_id: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE scan SET worker_id = $1, container_ids = array_append(container_ids, $2) \
             WHERE id = $3",
        )
        .bind(worker_id.get())
        .bind(container_id)
        .bind(id.get())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Refresh the cached asset counters shown in scan listings.
    pub async fn update_counts(
        &self,
        id: ScanId,
        subdomains: i64,
        endpoints: i64,
        vulnerabilities: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE scan SET subdomain_count = $1, endpoint_count = $2, \
             vulnerability_count = $3 WHERE id = $4",
        )
        .bind(subdomains as i32)
        .bind(endpoints as i32)
        .bind(vulnerabilities as i32)
        .bind(id.get())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn soft_delete(&self, ids: &[ScanId]) -> Result<u64, StoreError> {
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let result = sqlx::query(
            "UPDATE scan SET deleted_at = now() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(&raw)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn purge(&self, ids: &[i64]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM scan WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
