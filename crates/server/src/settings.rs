// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server settings and the config-center projection.

use xr_dispatch::{DispatchConfig, DispatchError};
use xr_wire::{DbConfig, LoggingConfig, PathsConfig, WorkerConfig};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub redis_url: String,
    /// Redis URL handed to workers when the server's own database is
    /// external (`WORKER_REDIS_URL`).
    pub worker_redis_url: String,
    pub log_level: String,
    pub enable_command_logging: bool,
    pub debug: bool,
    pub dispatch: DispatchConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, DispatchError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| DispatchError::Config("DATABASE_URL is not set".into()))?;
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://redis:6379/0".to_string());
        Ok(Self {
            database_url,
            redis_url,
            worker_redis_url: std::env::var("WORKER_REDIS_URL")
                .unwrap_or_else(|_| "redis://redis:6379/0".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            enable_command_logging: std::env::var("ENABLE_COMMAND_LOGGING")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            debug: std::env::var("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            dispatch: DispatchConfig::from_env()?,
        })
    }

    /// Build the config-center response for a worker.
    ///
    /// With an internal database (the compose stack), local workers use
    /// Docker service names while remote workers go through the public
    /// host. An external database is handed out as configured.
    pub fn worker_config(&self, is_local_worker: bool) -> WorkerConfig {
        let db = parse_database_url(&self.database_url);
        let internal_db = matches!(db.host.as_str(), "postgres" | "localhost" | "127.0.0.1");

        let (db_host, redis_url) = if internal_db {
            if is_local_worker {
                ("postgres".to_string(), "redis://redis:6379/0".to_string())
            } else {
                let public_host = &self.dispatch.public_host;
                if matches!(public_host.as_str(), "server" | "localhost" | "127.0.0.1") {
                    tracing::warn!(
                        public_host = %public_host,
                        "remote worker requested config but PUBLIC_HOST is not a public address"
                    );
                }
                (
                    public_host.clone(),
                    format!("redis://{public_host}:6379/0"),
                )
            }
        } else {
            (db.host.clone(), self.worker_redis_url.clone())
        };

        WorkerConfig {
            db: DbConfig {
                host: db_host,
                port: db.port,
                name: db.name,
                user: db.user,
                password: db.password,
            },
            redis_url,
            paths: PathsConfig {
                results: self.dispatch.container_results_mount.clone(),
                logs: self.dispatch.container_logs_mount.clone(),
            },
            logging: LoggingConfig {
                level: self.log_level.clone(),
                enable_command_logging: self.enable_command_logging,
            },
            debug: self.debug,
        }
    }
}

/// Pull (user, password, host, port, name) out of a postgres URL.
/// Unparseable urls yield empty parts rather than failing the config
/// endpoint.
pub(crate) fn parse_database_url(url: &str) -> DbConfig {
    let mut db = DbConfig {
        host: String::new(),
        port: "5432".to_string(),
        name: String::new(),
        user: String::new(),
        password: String::new(),
    };

    let Some(rest) = url
        .strip_prefix("postgres://")
        .or_else(|| url.strip_prefix("postgresql://"))
    else {
        return db;
    };

    let (credentials, location) = match rest.rsplit_once('@') {
        Some((creds, loc)) => (Some(creds), loc),
        None => (None, rest),
    };
    if let Some(credentials) = credentials {
        match credentials.split_once(':') {
            Some((user, password)) => {
                db.user = user.to_string();
                db.password = password.to_string();
            }
            None => db.user = credentials.to_string(),
        }
    }

    let (host_port, name) = match location.split_once('/') {
        Some((hp, name)) => (hp, name),
        None => (location, ""),
    };
    db.name = name.split('?').next().unwrap_or("").to_string();
    match host_port.split_once(':') {
        Some((host, port)) => {
            db.host = host.to_string();
            db.port = port.to_string();
        }
        None => db.host = host_port.to_string(),
    }
    db
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
