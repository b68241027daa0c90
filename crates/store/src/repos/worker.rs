// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker node repository.

use crate::StoreError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use xr_core::{WorkerId, WorkerStatus};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkerRow {
    pub id: i64,
    pub name: String,
    pub ip_address: String,
    pub ssh_port: i32,
    pub username: String,
    pub password: String,
    pub is_local: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkerRow {
    pub fn worker_id(&self) -> WorkerId {
        WorkerId::new(self.id)
    }

    pub fn status(&self) -> Result<WorkerStatus, StoreError> {
        self.status.parse().map_err(StoreError::InvalidValue)
    }
}

#[derive(Clone)]
pub struct WorkerRepo {
    pool: PgPool,
}

impl WorkerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent self-registration by name. Returns the row and whether
    /// it was freshly created.
    pub async fn register(
        &self,
        name: &str,
        is_local: bool,
    ) -> Result<(WorkerRow, bool), StoreError> {
        let inserted = sqlx::query_as::<_, WorkerRow>(
            "INSERT INTO worker_node (name, is_local, ip_address) \
             VALUES ($1, $2, '127.0.0.1') \
             ON CONFLICT (name) DO NOTHING RETURNING *",
        )
        .bind(name)
        .bind(is_local)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(row) => Ok((row, true)),
            None => {
                let row = self.get_by_name(name).await?;
                Ok((row, false))
            }
        }
    }

    pub async fn get(&self, id: WorkerId) -> Result<WorkerRow, StoreError> {
        sqlx::query_as::<_, WorkerRow>("SELECT * FROM worker_node WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("worker {id}")))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<WorkerRow, StoreError> {
        sqlx::query_as::<_, WorkerRow>("SELECT * FROM worker_node WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("worker {name}")))
    }

    pub async fn list(&self) -> Result<Vec<WorkerRow>, StoreError> {
        let rows =
            sqlx::query_as::<_, WorkerRow>("SELECT * FROM worker_node ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Deployed nodes only (online/offline); the scheduling candidate set
    /// before the liveness filter.
    pub async fn list_deployed(&self) -> Result<Vec<WorkerRow>, StoreError> {
        let rows = sqlx::query_as::<_, WorkerRow>(
            "SELECT * FROM worker_node WHERE status IN ('online', 'offline') ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn set_status(&self, id: WorkerId, status: WorkerStatus) -> Result<(), StoreError> {
        sqlx::query("UPDATE worker_node SET status = $1, updated_at = now() WHERE id = $2")
            .bind(status.as_str())
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: WorkerId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM worker_node WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
