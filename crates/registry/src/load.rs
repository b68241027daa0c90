// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed worker load registry.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use xr_core::{LivenessError, LoadSample, WorkerId, WorkerLiveness};

/// Telemetry records expire this long after the last heartbeat.
pub const LOAD_TTL: Duration = Duration::from_secs(15);

/// Wire shape of one stored telemetry record.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLoad {
    cpu: f64,
    mem: f64,
    ts: i64,
}

/// Worker telemetry store over Redis.
#[derive(Clone)]
pub struct RedisLoadRegistry {
    conn: ConnectionManager,
}

impl RedisLoadRegistry {
    pub async fn connect(redis_url: &str) -> Result<Self, LivenessError> {
        let client = redis::Client::open(redis_url).map_err(to_liveness_err)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(to_liveness_err)?;
        Ok(Self { conn })
    }

    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(id: WorkerId) -> String {
        format!("worker:load:{id}")
    }
}

#[async_trait]
impl WorkerLiveness for RedisLoadRegistry {
    async fn update(&self, id: WorkerId, sample: LoadSample) -> Result<(), LivenessError> {
        let stored = StoredLoad {
            cpu: sample.cpu_percent,
            mem: sample.mem_percent,
            ts: chrono::Utc::now().timestamp(),
        };
        let payload = serde_json::to_string(&stored)
            .map_err(|e| LivenessError(format!("encode load record: {e}")))?;
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(id), payload, LOAD_TTL.as_secs())
            .await
            .map_err(to_liveness_err)
    }

    async fn get_all(
        &self,
        ids: &[WorkerId],
    ) -> Result<HashMap<WorkerId, LoadSample>, LivenessError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let keys: Vec<String> = ids.iter().map(|id| Self::key(*id)).collect();
        let mut conn = self.conn.clone();
        // MGET with a single key returns a scalar; normalize through Vec.
        let values: Vec<Option<String>> = if keys.len() == 1 {
            let one: Option<String> = conn.get(&keys[0]).await.map_err(to_liveness_err)?;
            vec![one]
        } else {
            conn.mget(&keys).await.map_err(to_liveness_err)?
        };

        let mut loads = HashMap::new();
        for (id, value) in ids.iter().zip(values) {
            let Some(raw) = value else { continue };
            match serde_json::from_str::<StoredLoad>(&raw) {
                Ok(stored) => {
                    loads.insert(*id, LoadSample::new(stored.cpu, stored.mem));
                }
                Err(e) => {
                    tracing::debug!(worker_id = %id, error = %e, "discarding malformed load record");
                }
            }
        }
        Ok(loads)
    }

    async fn is_online(&self, id: WorkerId) -> Result<bool, LivenessError> {
        let mut conn = self.conn.clone();
        conn.exists(Self::key(id)).await.map_err(to_liveness_err)
    }

    async fn delete(&self, id: WorkerId) -> Result<(), LivenessError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::key(id)).await.map_err(to_liveness_err)
    }
}

fn to_liveness_err(e: redis::RedisError) -> LivenessError {
    LivenessError(e.to_string())
}
