// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan submission endpoint.

use super::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use xr_dispatch::{DispatchError, ScanFlowArgs};
use xr_wire::{ScanSubmitRequest, ScanSubmitResponse};

/// `POST /api/scans` — create the scan row, then hand the flow to the
/// dispatcher. Submission failures surface in the response body; the
/// scan row is marked failed so it never dangles in `initiated`.
pub(super) async fn submit(
    State(state): State<AppState>,
    Json(req): Json<ScanSubmitRequest>,
) -> Result<Json<ScanSubmitResponse>, ApiError> {
    let target = state.stores.targets.get(req.target_id).await?;
    let engine = state.stores.engines.get_by_name(&req.engine_name).await?;

    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let workspace_dir = format!("scan_{}_{stamp}", target.id);
    let scan = state
        .stores
        .scans
        .create(target.target_id(), xr_core::EngineId::new(engine.id), &workspace_dir)
        .await?;

    let args = ScanFlowArgs {
        scan_id: scan.scan_id(),
        target_name: target.name.clone(),
        target_id: target.target_id(),
        scan_workspace_dir: workspace_dir,
        engine_name: engine.name.clone(),
        scheduled_scan_name: req.scheduled_scan_name.clone(),
    };

    match state.dispatcher.submit_scan(args).await {
        Ok(submission) => {
            state
                .stores
                .scans
                .assign_worker(scan.scan_id(), submission.worker_id, &submission.container_id)
                .await?;
            Ok(Json(ScanSubmitResponse {
                success: true,
                message: submission.message,
                scan_id: Some(scan.scan_id()),
                container_id: Some(submission.container_id),
                worker_id: Some(submission.worker_id),
            }))
        }
        Err(DispatchError::NoWorker) => {
            state
                .stores
                .scans
                .set_failed(scan.scan_id(), "no worker available")
                .await?;
            Ok(Json(ScanSubmitResponse {
                success: false,
                message: "no worker available".into(),
                scan_id: Some(scan.scan_id()),
                container_id: None,
                worker_id: None,
            }))
        }
        Err(e) => {
            let message = e.to_string();
            state.stores.scans.set_failed(scan.scan_id(), &message).await?;
            Ok(Json(ScanSubmitResponse {
                success: false,
                message,
                scan_id: Some(scan.scan_id()),
                container_id: None,
                worker_id: None,
            }))
        }
    }
}
