// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent mode: register once, then report CPU/memory every few seconds.
//! The server's liveness view of this node is exactly these beats.

use crate::client::ServerClient;
use std::time::Duration;
use xr_wire::HeartbeatRequest;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(3);

pub async fn run_agent(name: &str, is_local: bool) -> anyhow::Result<()> {
    let client = ServerClient::from_env()?;
    let registered = client.register(name, is_local).await?;
    tracing::info!(
        worker_id = %registered.worker_id,
        created = registered.created,
        "registered with server"
    );

    let version = std::env::var("AGENT_VERSION").unwrap_or_else(|_| "unknown".to_string());
    let mut sys = sysinfo::System::new();
    let mut ticker = tokio::time::interval(HEARTBEAT_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        sys.refresh_cpu_usage();
        sys.refresh_memory();
        let beat = HeartbeatRequest {
            cpu_percent: sys.global_cpu_usage() as f64,
            memory_percent: if sys.total_memory() == 0 {
                0.0
            } else {
                sys.used_memory() as f64 / sys.total_memory() as f64 * 100.0
            },
            version: version.clone(),
        };

        match client.heartbeat(registered.worker_id.get(), &beat).await {
            Ok(response) => {
                if response.need_update {
                    tracing::info!(
                        server_version = %response.server_version,
                        agent_version = %version,
                        "server reports version drift"
                    );
                }
            }
            Err(e) => {
                // Server restarts must not kill the agent; liveness
                // recovers with the next successful beat.
                tracing::warn!(error = %e, "heartbeat failed");
            }
        }
    }
}
