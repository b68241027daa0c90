// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker control-plane endpoints.

use super::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use xr_core::{advance_on_heartbeat, LoadSample, WorkerId, WorkerLiveness, WorkerStatus};
use xr_wire::{
    HeartbeatRequest, HeartbeatResponse, RegisterRequest, RegisterResponse, WorkerConfig,
    WorkerSummary,
};

/// `POST /api/workers/register` — idempotent self-registration.
pub(super) async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".into()));
    }
    let (row, created) = state.control.register(req.name.trim(), req.is_local).await?;
    Ok(Json(RegisterResponse {
        worker_id: row.worker_id(),
        name: row.name,
        created,
    }))
}

/// `POST /api/workers/{id}/heartbeat` — telemetry sink, then the pure
/// state advance, then (maybe) a locked background update dispatch.
pub(super) async fn heartbeat(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<HeartbeatRequest>,
) -> Result<Json<HeartbeatResponse>, ApiError> {
    let worker_id = WorkerId::new(id);
    let worker = state.stores.workers.get(worker_id).await?;

    state
        .registry
        .update(
            worker_id,
            LoadSample::new(req.cpu_percent, req.memory_percent),
        )
        .await?;

    let current: WorkerStatus = worker
        .status()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let server_version = &state.settings.dispatch.image_tag;
    let transition = advance_on_heartbeat(current, &req.version, server_version, worker.is_local);
    if transition.need_update {
        tracing::info!(
            worker = %worker.name,
            agent_version = %req.version,
            server_version = %server_version,
            "agent version drift"
        );
    }
    state
        .control
        .apply_heartbeat(&worker, transition, &state.update_lock)
        .await?;

    Ok(Json(HeartbeatResponse {
        status: "ok".into(),
        need_update: transition.need_update,
        server_version: server_version.clone(),
    }))
}

/// `GET /api/workers` — inventory joined with live telemetry.
pub(super) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkerSummary>>, ApiError> {
    let rows = state.stores.workers.list().await?;
    let ids: Vec<WorkerId> = rows.iter().map(|r| r.worker_id()).collect();
    let loads = state.registry.get_all(&ids).await?;

    let summaries = rows
        .into_iter()
        .map(|row| {
            let load = loads.get(&row.worker_id());
            WorkerSummary {
                worker_id: row.worker_id(),
                name: row.name,
                ip_address: row.ip_address,
                is_local: row.is_local,
                status: row.status,
                cpu_percent: load.map(|l| l.cpu_percent),
                memory_percent: load.map(|l| l.mem_percent),
            }
        })
        .collect();
    Ok(Json(summaries))
}

#[derive(Debug, Deserialize)]
pub(super) struct ConfigQuery {
    #[serde(default)]
    is_local: String,
}

/// `GET /api/workers/config` — the config center.
pub(super) async fn config(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> Json<WorkerConfig> {
    let is_local_worker = query.is_local.eq_ignore_ascii_case("true");
    tracing::info!(is_local_worker, "worker config requested");
    Json(state.settings.worker_config(is_local_worker))
}

/// `DELETE /api/workers/{id}` — purge telemetry, drop the row, fire the
/// background uninstall, answer immediately.
pub(super) async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let worker = state.stores.workers.get(WorkerId::new(id)).await?;
    let name = worker.name.clone();
    state.control.delete(worker, &state.registry).await?;
    Ok(Json(serde_json::json!({
        "message": format!("worker {name} deleted")
    })))
}
