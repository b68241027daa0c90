// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distributed set-if-absent lock for remote worker updates.
//!
//! Parallel heartbeats from one worker must not race multiple SSH update
//! attempts. The lock key has a 60 s TTL so a crashed updater cannot
//! wedge the worker forever.

use redis::aio::ConnectionManager;
use std::time::Duration;
use xr_core::{LivenessError, WorkerId};

/// TTL on a held update lock.
const LOCK_TTL: Duration = Duration::from_secs(60);

/// Per-worker update lock over Redis `SET NX EX`.
#[derive(Clone)]
pub struct UpdateLock {
    conn: ConnectionManager,
}

impl UpdateLock {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(worker_id: WorkerId) -> String {
        format!("worker:update-lock:{worker_id}")
    }

    /// Try to take the lock. `false` means another updater holds it.
    pub async fn try_acquire(&self, worker_id: WorkerId) -> Result<bool, LivenessError> {
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(Self::key(worker_id))
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(LOCK_TTL.as_secs())
            .query_async(&mut conn)
            .await
            .map_err(|e| LivenessError(e.to_string()))?;
        Ok(reply.is_some())
    }

    /// Release early; otherwise the TTL cleans up.
    pub async fn release(&self, worker_id: WorkerId) -> Result<(), LivenessError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("DEL")
            .arg(Self::key(worker_id))
            .query_async(&mut conn)
            .await
            .map_err(|e| LivenessError(e.to_string()))?;
        Ok(())
    }
}
