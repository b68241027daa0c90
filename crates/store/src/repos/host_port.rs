// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host/ip/port mapping repository.

use crate::conflict;
use crate::{StoreError, BATCH_SIZE};
use futures_util::Stream;
use sqlx::{PgPool, QueryBuilder};
use xr_core::{HostPortRecord, TargetId};

#[derive(Clone)]
pub struct HostPortRepo {
    pool: PgPool,
}

impl HostPortRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bulk insert, ignoring (target, host, ip, port) duplicates.
    pub async fn bulk_insert_ignore(&self, items: &[HostPortRecord]) -> Result<u64, StoreError> {
        if items.is_empty() {
            return Ok(0);
        }
        let mut written = 0u64;
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb =
                QueryBuilder::new("INSERT INTO host_port_mapping (target_id, host, ip, port) ");
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(item.target_id.get())
                    .push_bind(&item.host)
                    .push_bind(&item.ip)
                    .push_bind(item.port as i32);
            });
            qb.push(conflict::HOST_PORT_MAPPING.on_conflict_clause());
            let result = qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
            written += result.rows_affected();
        }
        Ok(written)
    }

    /// Stream distinct IPs, ascending.
    pub fn ips_for_export(
        &self,
        target_id: TargetId,
        chunk: usize,
    ) -> impl Stream<Item = Result<String, StoreError>> {
        super::export_by_value(
            self.pool.clone(),
            "SELECT DISTINCT ip FROM host_port_mapping WHERE target_id = $1 AND ip > $2 \
             ORDER BY ip LIMIT $3",
            target_id.get(),
            chunk,
        )
    }

    /// Stream `host:port` pairs for site probing input.
    pub fn pairs_for_export(
        &self,
        target_id: TargetId,
        chunk: usize,
    ) -> impl Stream<Item = Result<String, StoreError>> {
        super::export_by_id(
            self.pool.clone(),
            "SELECT id, host || ':' || port::text FROM host_port_mapping \
             WHERE target_id = $1 AND id > $2 ORDER BY id LIMIT $3",
            target_id.get(),
            chunk,
        )
    }
}
