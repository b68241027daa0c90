// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task-container entrypoints.

pub mod cleanup;
pub mod delete;
pub mod initiate_scan;

use crate::client::ServerClient;
use anyhow::Context;
use xr_store::Stores;
use xr_wire::WorkerConfig;

/// Bootstrap shared by every entrypoint: ask the config center who we
/// are, then connect to the database it hands us.
pub(crate) async fn bootstrap() -> anyhow::Result<(WorkerConfig, Stores)> {
    let is_local = std::env::var("IS_LOCAL")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let client = ServerClient::from_env()?;
    let config = client.fetch_config(is_local).await?;

    let pool = xr_store::connect(&config.db.url())
        .await
        .context("connect to database")?;
    Ok((config, Stores::new(pool)))
}
