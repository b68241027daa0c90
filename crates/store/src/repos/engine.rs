// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan engine and nuclei template repo repositories.

use crate::StoreError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScanEngineRow {
    pub id: i64,
    pub name: String,
    /// Opaque configuration payload consumed by the pipeline.
    pub configuration: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct EngineRepo {
    pool: PgPool,
}

impl EngineRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, configuration: &str) -> Result<ScanEngineRow, StoreError> {
        let row = sqlx::query_as::<_, ScanEngineRow>(
            "INSERT INTO scan_engine (name, configuration) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(configuration)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<ScanEngineRow, StoreError> {
        sqlx::query_as::<_, ScanEngineRow>("SELECT * FROM scan_engine WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("scan engine {name}")))
    }

    pub async fn list(&self) -> Result<Vec<ScanEngineRow>, StoreError> {
        let rows = sqlx::query_as::<_, ScanEngineRow>(
            "SELECT * FROM scan_engine ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TemplateRepoRow {
    pub id: i64,
    pub name: String,
    pub repo_url: String,
    pub local_path: String,
    pub commit_hash: String,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Nuclei template git repositories. Sync itself happens elsewhere; the
/// pipeline only resolves names to materialized working copies.
#[derive(Clone)]
pub struct TemplateRepos {
    pool: PgPool,
}

impl TemplateRepos {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<TemplateRepoRow, StoreError> {
        sqlx::query_as::<_, TemplateRepoRow>("SELECT * FROM nuclei_template_repo WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("nuclei template repo {name}")))
    }

    pub async fn list(&self) -> Result<Vec<TemplateRepoRow>, StoreError> {
        let rows = sqlx::query_as::<_, TemplateRepoRow>(
            "SELECT * FROM nuclei_template_repo ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
