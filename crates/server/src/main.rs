// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! xingrin-server entrypoint.

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use xr_server::{build_router, AppState, Settings};

#[derive(Debug, Parser)]
#[command(name = "xingrin-server", about = "xingrin scan orchestration server")]
struct Args {
    /// Bind address for the control plane.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

fn init_tracing(settings: &Settings) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender =
        tracing_appender::rolling::daily(&settings.dispatch.host_logs_dir, "server.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("install tracing subscriber")?;
    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::from_env().context("load settings")?;
    let _log_guard = init_tracing(&settings)?;

    let port = settings.dispatch.server_port;
    let state = AppState::build(settings).await.context("build app state")?;
    let background = state.background.clone();
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{port}", args.bind)
        .parse()
        .context("parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "control plane listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .context("serve")?;

    background.shutdown(Duration::from_secs(5)).await;
    Ok(())
}
