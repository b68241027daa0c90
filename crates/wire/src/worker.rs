// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker registration and heartbeat messages.

use serde::{Deserialize, Serialize};
use xr_core::WorkerId;

/// `POST /api/workers/register` — idempotent by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub worker_id: WorkerId,
    pub name: String,
    /// True when this call created the row, false when it already existed.
    pub created: bool,
}

/// `POST /api/workers/{id}/heartbeat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub memory_percent: f64,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub status: String,
    pub need_update: bool,
    pub server_version: String,
}

/// One row of `GET /api/workers` — inventory joined with live telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub worker_id: WorkerId,
    pub name: String,
    pub ip_address: String,
    pub is_local: bool,
    pub status: String,
    /// Present only while a TTL-valid heartbeat exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_percent: Option<f64>,
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
