// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan submission messages.

use serde::{Deserialize, Serialize};
use xr_core::{ScanId, TargetId, WorkerId};

/// `POST /api/scans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSubmitRequest {
    pub target_id: TargetId,
    pub engine_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_scan_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSubmitResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<ScanId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<WorkerId>,
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
