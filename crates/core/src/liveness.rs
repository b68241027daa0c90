// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker liveness and load capability.
//!
//! The dispatcher consumes this trait instead of a concrete registry so
//! the scheduling logic and the Redis-backed telemetry store stay
//! decoupled (the registry depends on nothing here but the trait).

use crate::WorkerId;
use async_trait::async_trait;
use std::collections::HashMap;

/// High-load partition thresholds: a worker above either is considered
/// overloaded and only selected on the degraded path.
pub const OVERLOAD_CPU_PERCENT: f64 = 85.0;
pub const OVERLOAD_MEM_PERCENT: f64 = 85.0;

/// One telemetry reading for a worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSample {
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

impl LoadSample {
    pub fn new(cpu_percent: f64, mem_percent: f64) -> Self {
        Self {
            cpu_percent,
            mem_percent,
        }
    }

    /// Weighted scheduling score; lower is better.
    pub fn score(&self) -> f64 {
        self.cpu_percent * 0.7 + self.mem_percent * 0.3
    }

    pub fn is_overloaded(&self) -> bool {
        self.cpu_percent > OVERLOAD_CPU_PERCENT || self.mem_percent > OVERLOAD_MEM_PERCENT
    }
}

/// Live view over worker telemetry.
///
/// Liveness is defined by TTL presence in the backing store; the durable
/// worker row status is not consulted here.
#[async_trait]
pub trait WorkerLiveness: Send + Sync {
    /// Record a telemetry reading and refresh its TTL.
    async fn update(&self, id: WorkerId, sample: LoadSample) -> Result<(), LivenessError>;

    /// Batch-fetch current readings. Workers with no (or expired) reading
    /// are absent from the result.
    async fn get_all(
        &self,
        ids: &[WorkerId],
    ) -> Result<HashMap<WorkerId, LoadSample>, LivenessError>;

    /// Whether a TTL-valid reading exists for the worker.
    async fn is_online(&self, id: WorkerId) -> Result<bool, LivenessError>;

    /// Drop the worker's reading.
    async fn delete(&self, id: WorkerId) -> Result<(), LivenessError>;
}

/// Failure talking to the telemetry store.
#[derive(Debug, thiserror::Error)]
#[error("load registry error: {0}")]
pub struct LivenessError(pub String);

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
