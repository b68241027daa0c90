// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP routing and the API error envelope.

mod scans;
mod workers;

use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use thiserror::Error;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/workers", get(workers::list))
        .route("/api/workers/register", post(workers::register))
        .route("/api/workers/{id}/heartbeat", post(workers::heartbeat))
        .route("/api/workers/config", get(workers::config))
        .route("/api/workers/{id}", delete(workers::destroy))
        .route("/api/scans", post(scans::submit))
        .with_state(state)
}

/// Error envelope for every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] xr_store::StoreError),

    #[error(transparent)]
    Liveness(#[from] xr_core::LivenessError),

    #[error(transparent)]
    Dispatch(#[from] xr_dispatch::DispatchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(xr_store::StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Liveness(_) | ApiError::Dispatch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
