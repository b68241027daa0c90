// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Organization repository.

use crate::StoreError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrganizationRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct OrganizationRepo {
    pool: PgPool,
}

impl OrganizationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<OrganizationRow, StoreError> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            "INSERT INTO organization (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn link_target(&self, organization_id: i64, target_id: i64) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO organization_targets (organization_id, target_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(organization_id)
        .bind(target_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn soft_delete(&self, ids: &[i64]) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE organization SET deleted_at = now() WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn purge(&self, ids: &[i64]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM organization WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
