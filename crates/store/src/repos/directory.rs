// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory repository.

use crate::conflict;
use crate::{StoreError, BATCH_SIZE};
use futures_util::Stream;
use sqlx::{PgPool, QueryBuilder};
use xr_core::{DirectoryRecord, TargetId};

#[derive(Clone)]
pub struct DirectoryRepo {
    pool: PgPool,
}

impl DirectoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert on (website, url): response stats refresh on conflict.
    pub async fn bulk_upsert(&self, items: &[DirectoryRecord]) -> Result<u64, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let mut written = 0u64;
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO directory (website_id, target_id, url, status, content_length, \
                 words, lines, content_type, duration) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(item.website_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(item.status)
                    .push_bind(item.content_length)
                    .push_bind(item.words)
                    .push_bind(item.lines)
                    .push_bind(&item.content_type)
                    .push_bind(item.duration);
            });
            qb.push(conflict::DIRECTORY.on_conflict_clause());
            let result = qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
            written += result.rows_affected();
        }
        Ok(written)
    }

    pub async fn count_by_website(&self, website_id: i64) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM directory WHERE website_id = $1")
                .bind(website_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Stream directory urls for input-file export.
    pub fn urls_for_export(
        &self,
        target_id: TargetId,
        chunk: usize,
    ) -> impl Stream<Item = Result<String, StoreError>> {
        super::export_by_id(
            self.pool.clone(),
            "SELECT id, url FROM directory WHERE target_id = $1 AND id > $2 ORDER BY id LIMIT $3",
            target_id.get(),
            chunk,
        )
    }
}
