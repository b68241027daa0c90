// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vulnerability repository. Findings append; there is no natural key.

use crate::{StoreError, BATCH_SIZE};
use sqlx::{PgPool, QueryBuilder};
use xr_core::{TargetId, VulnerabilityRecord};

#[derive(Clone)]
pub struct VulnerabilityRepo {
    pool: PgPool,
}

impl VulnerabilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn bulk_append(&self, items: &[VulnerabilityRecord]) -> Result<u64, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let mut written = 0u64;
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO vulnerability (target_id, url, vuln_type, severity, source, \
                 cvss_score, description, raw_output) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(&item.vuln_type)
                    .push_bind(item.severity.as_str())
                    .push_bind(&item.source)
                    .push_bind(item.cvss_score)
                    .push_bind(&item.description)
                    .push_bind(&item.raw_output);
            });
            let result = qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
            written += result.rows_affected();
        }
        Ok(written)
    }

    pub async fn count_by_target(&self, target_id: TargetId) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vulnerability WHERE target_id = $1")
                .bind(target_id.get())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
