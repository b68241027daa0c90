// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository layer: one module per table family.

pub mod directory;
pub mod endpoint;
pub mod engine;
pub mod host_port;
pub mod organization;
pub mod scan;
pub mod subdomain;
pub mod target;
pub mod vulnerability;
pub mod website;
pub mod worker;
pub mod wordlist;

use crate::StoreError;
use futures_util::stream::{try_unfold, Stream};
use sqlx::PgPool;
use std::collections::VecDeque;

/// Keyset-paginated streaming export over `(id, value)` projections.
///
/// `sql` must select `(id, value)` rows with placeholders `$1` = target
/// id, `$2` = last seen id, `$3` = chunk size, ordered by id. The stream
/// holds no server-side cursor and is not restartable mid-iteration.
pub(crate) fn export_by_id(
    pool: PgPool,
    sql: &'static str,
    target_id: i64,
    chunk: usize,
) -> impl Stream<Item = Result<String, StoreError>> {
    let state = (pool, 0i64, VecDeque::<(i64, String)>::new(), false);
    try_unfold(state, move |(pool, mut last_id, mut buf, done)| async move {
        if let Some((id, value)) = buf.pop_front() {
            last_id = last_id.max(id);
            return Ok(Some((value, (pool, last_id, buf, done))));
        }
        if done {
            return Ok(None);
        }
        let rows: Vec<(i64, String)> = sqlx::query_as(sql)
            .bind(target_id)
            .bind(last_id)
            .bind(chunk as i64)
            .fetch_all(&pool)
            .await?;
        let done = rows.len() < chunk;
        buf.extend(rows);
        match buf.pop_front() {
            Some((id, value)) => {
                last_id = last_id.max(id);
                Ok(Some((value, (pool, last_id, buf, done))))
            }
            None => Ok(None),
        }
    })
}

/// Keyset-paginated export over distinct string values.
///
/// `sql` must select distinct `value` rows greater than `$2`, ordered
/// ascending, with `$1` = target id and `$3` = chunk size.
pub(crate) fn export_by_value(
    pool: PgPool,
    sql: &'static str,
    target_id: i64,
    chunk: usize,
) -> impl Stream<Item = Result<String, StoreError>> {
    let state = (pool, String::new(), VecDeque::<String>::new(), false);
    try_unfold(state, move |(pool, mut last, mut buf, done)| async move {
        if let Some(value) = buf.pop_front() {
            last = value.clone();
            return Ok(Some((value, (pool, last, buf, done))));
        }
        if done {
            return Ok(None);
        }
        let rows: Vec<(String,)> = sqlx::query_as(sql)
            .bind(target_id)
            .bind(&last)
            .bind(chunk as i64)
            .fetch_all(&pool)
            .await?;
        let done = rows.len() < chunk;
        buf.extend(rows.into_iter().map(|(v,)| v));
        match buf.pop_front() {
            Some(value) => {
                last = value.clone();
                Ok(Some((value, (pool, last, buf, done))))
            }
            None => Ok(None),
        }
    })
}
