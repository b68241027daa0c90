// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Endpoint repository.

use crate::conflict;
use crate::{StoreError, BATCH_SIZE};
use futures_util::Stream;
use sqlx::{PgPool, QueryBuilder};
use xr_core::{EndpointRecord, TargetId};

#[derive(Clone)]
pub struct EndpointRepo {
    pool: PgPool,
}

impl EndpointRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert on (url, target): probe metadata and GF labels refresh,
    /// `discovered_at` stays at first insert.
    pub async fn bulk_upsert(&self, items: &[EndpointRecord]) -> Result<u64, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let mut written = 0u64;
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO endpoint (target_id, url, host, location, title, webserver, \
                 body_preview, content_type, tech, status_code, content_length, vhost, \
                 matched_gf_patterns) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(&item.meta.host)
                    .push_bind(&item.meta.location)
                    .push_bind(&item.meta.title)
                    .push_bind(&item.meta.webserver)
                    .push_bind(&item.meta.body_preview)
                    .push_bind(&item.meta.content_type)
                    .push_bind(&item.meta.tech)
                    .push_bind(item.meta.status_code)
                    .push_bind(item.meta.content_length)
                    .push_bind(item.meta.vhost)
                    .push_bind(&item.matched_gf_patterns);
            });
            qb.push(conflict::ENDPOINT.on_conflict_clause());
            let result = qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
            written += result.rows_affected();
        }
        Ok(written)
    }

    pub async fn count_by_target(&self, target_id: TargetId) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM endpoint WHERE target_id = $1")
            .bind(target_id.get())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Stream endpoint urls for input-file export.
    pub fn urls_for_export(
        &self,
        target_id: TargetId,
        chunk: usize,
    ) -> impl Stream<Item = Result<String, StoreError>> {
        super::export_by_id(
            self.pool.clone(),
            "SELECT id, url FROM endpoint WHERE target_id = $1 AND id > $2 ORDER BY id LIMIT $3",
            target_id.get(),
            chunk,
        )
    }
}
