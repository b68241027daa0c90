// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory load registry with real TTL semantics.
//!
//! Drop-in [`WorkerLiveness`] for tests and single-node development; the
//! expiry rules match the Redis implementation.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use xr_core::{LivenessError, LoadSample, WorkerId, WorkerLiveness};

use crate::LOAD_TTL;

#[derive(Clone, Default)]
pub struct MemoryLoadRegistry {
    entries: Arc<Mutex<HashMap<WorkerId, (LoadSample, Instant)>>>,
    ttl: Duration,
}

impl MemoryLoadRegistry {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl: LOAD_TTL,
        }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn live(&self, expires: Instant) -> bool {
        Instant::now() < expires
    }
}

#[async_trait]
impl WorkerLiveness for MemoryLoadRegistry {
    async fn update(&self, id: WorkerId, sample: LoadSample) -> Result<(), LivenessError> {
        let ttl = if self.ttl.is_zero() { LOAD_TTL } else { self.ttl };
        self.entries
            .lock()
            .insert(id, (sample, Instant::now() + ttl));
        Ok(())
    }

    async fn get_all(
        &self,
        ids: &[WorkerId],
    ) -> Result<HashMap<WorkerId, LoadSample>, LivenessError> {
        let entries = self.entries.lock();
        let mut out = HashMap::new();
        for id in ids {
            if let Some((sample, expires)) = entries.get(id) {
                if self.live(*expires) {
                    out.insert(*id, *sample);
                }
            }
        }
        Ok(out)
    }

    async fn is_online(&self, id: WorkerId) -> Result<bool, LivenessError> {
        let entries = self.entries.lock();
        Ok(entries
            .get(&id)
            .map(|(_, expires)| self.live(*expires))
            .unwrap_or(false))
    }

    async fn delete(&self, id: WorkerId) -> Result<(), LivenessError> {
        self.entries.lock().remove(&id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
