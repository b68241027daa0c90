// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subdomain repository.

use crate::conflict;
use crate::{StoreError, BATCH_SIZE};
use futures_util::Stream;
use sqlx::{PgPool, QueryBuilder};
use xr_core::{SubdomainRecord, TargetId};

#[derive(Clone)]
pub struct SubdomainRepo {
    pool: PgPool,
}

impl SubdomainRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bulk insert, ignoring rows whose (name, target) already exists.
    /// Each chunk is one transaction; a failed chunk rolls back whole.
    pub async fn bulk_insert_ignore(&self, items: &[SubdomainRecord]) -> Result<u64, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let mut written = 0u64;
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new("INSERT INTO subdomain (target_id, name) ");
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(item.target_id.get()).push_bind(&item.name);
            });
            qb.push(conflict::SUBDOMAIN.on_conflict_clause());
            let result = qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
            written += result.rows_affected();
        }
        tracing::debug!(total = items.len(), written, "subdomain batch stored");
        Ok(written)
    }

    pub async fn count_by_target(&self, target_id: TargetId) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subdomain WHERE target_id = $1")
                .bind(target_id.get())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Stream subdomain names for input-file export.
    pub fn names_for_export(
        &self,
        target_id: TargetId,
        chunk: usize,
    ) -> impl Stream<Item = Result<String, StoreError>> {
        super::export_by_id(
            self.pool.clone(),
            "SELECT id, name FROM subdomain WHERE target_id = $1 AND id > $2 ORDER BY id LIMIT $3",
            target_id.get(),
            chunk,
        )
    }
}
