// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher configuration, read once at startup.

use crate::DispatchError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Task container image, tag included. Pre-pulled at install time.
    pub docker_image: String,
    /// Server (and expected agent) version tag.
    pub image_tag: String,
    /// Minimum spacing between consecutive dispatches, so heartbeats can
    /// reflect the previous launch before the next selection.
    pub submit_interval: Duration,
    /// Breather before falling back to an overloaded worker.
    pub high_load_wait: Duration,
    pub docker_network_name: String,
    pub server_port: u16,
    pub public_host: String,
    pub host_results_dir: String,
    pub host_logs_dir: String,
    pub container_results_mount: String,
    pub container_logs_mount: String,
}

impl DispatchConfig {
    /// Read from the environment. `TASK_EXECUTOR_IMAGE` and `IMAGE_TAG`
    /// are required; startup fails without them.
    pub fn from_env() -> Result<Self, DispatchError> {
        let docker_image = require("TASK_EXECUTOR_IMAGE")?;
        let image_tag = require("IMAGE_TAG")?;
        Ok(Self {
            docker_image,
            image_tag,
            submit_interval: Duration::from_secs(env_parse("TASK_SUBMIT_INTERVAL").unwrap_or(5)),
            high_load_wait: Duration::from_secs(env_parse("HIGH_LOAD_WAIT_SECONDS").unwrap_or(60)),
            docker_network_name: env_or("DOCKER_NETWORK_NAME", "xingrin-net"),
            server_port: env_parse("SERVER_PORT").unwrap_or(8000),
            public_host: env_or("PUBLIC_HOST", "127.0.0.1"),
            host_results_dir: env_or("HOST_RESULTS_DIR", "/opt/xingrin/results"),
            host_logs_dir: env_or("HOST_LOGS_DIR", "/opt/xingrin/logs"),
            container_results_mount: env_or("CONTAINER_RESULTS_MOUNT", "/app/results"),
            container_logs_mount: env_or("CONTAINER_LOGS_MOUNT", "/app/logs"),
        })
    }

    /// Defaults with the two required fields supplied; used by tests.
    pub fn for_image(docker_image: impl Into<String>, image_tag: impl Into<String>) -> Self {
        Self {
            docker_image: docker_image.into(),
            image_tag: image_tag.into(),
            submit_interval: Duration::from_secs(5),
            high_load_wait: Duration::from_secs(60),
            docker_network_name: "xingrin-net".into(),
            server_port: 8000,
            public_host: "127.0.0.1".into(),
            host_results_dir: "/opt/xingrin/results".into(),
            host_logs_dir: "/opt/xingrin/logs".into(),
            container_results_mount: "/app/results".into(),
            container_logs_mount: "/app/logs".into(),
        }
    }
}

fn require(key: &str) -> Result<String, DispatchError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DispatchError::Config(format!("{key} is not set")))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
