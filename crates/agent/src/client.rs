// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the server control plane.

use anyhow::Context;
use std::time::Duration;
use xr_wire::{
    HeartbeatRequest, HeartbeatResponse, RegisterRequest, RegisterResponse, WorkerConfig,
};

pub struct ServerClient {
    base_url: String,
    http: reqwest::Client,
}

impl ServerClient {
    /// Server base url from `SERVER_URL` — the one variable every
    /// container gets injected.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("SERVER_URL").context("SERVER_URL is not set")?;
        Self::new(&base_url)
    }

    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn register(&self, name: &str, is_local: bool) -> anyhow::Result<RegisterResponse> {
        let response = self
            .http
            .post(format!("{}/api/workers/register", self.base_url))
            .json(&RegisterRequest {
                name: name.to_string(),
                is_local,
            })
            .send()
            .await
            .context("register request")?
            .error_for_status()
            .context("register rejected")?;
        Ok(response.json().await.context("decode register response")?)
    }

    pub async fn heartbeat(
        &self,
        worker_id: i64,
        beat: &HeartbeatRequest,
    ) -> anyhow::Result<HeartbeatResponse> {
        let response = self
            .http
            .post(format!("{}/api/workers/{worker_id}/heartbeat", self.base_url))
            .json(beat)
            .send()
            .await
            .context("heartbeat request")?
            .error_for_status()
            .context("heartbeat rejected")?;
        Ok(response.json().await.context("decode heartbeat response")?)
    }

    pub async fn fetch_config(&self, is_local: bool) -> anyhow::Result<WorkerConfig> {
        let response = self
            .http
            .get(format!(
                "{}/api/workers/config?is_local={is_local}",
                self.base_url
            ))
            .send()
            .await
            .context("config request")?
            .error_for_status()
            .context("config rejected")?;
        Ok(response.json().await.context("decode worker config")?)
    }
}
