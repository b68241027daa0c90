// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config-center payload (`GET /api/workers/config`).
//!
//! Field names are camelCase on the wire; the agent bootstraps its whole
//! runtime from this one response.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub results: String,
    pub logs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    pub level: String,
    pub enable_command_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    pub db: DbConfig,
    pub redis_url: String,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub debug: bool,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
