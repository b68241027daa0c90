// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! xingrin-worker: the worker-side binary.
//!
//! Two lives: the long-running `agent` mode (self-register + heartbeat
//! loop) and the task-container entrypoints launched by the server
//! (`run_initiate_scan`, `run_cleanup`, `run_delete_*`). Entrypoint
//! names are part of the container launch contract and never change.

mod client;
mod heartbeat;
mod scripts;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "xingrin-worker", about = "xingrin scan worker")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register with the server and report telemetry forever.
    Agent {
        #[arg(long, env = "WORKER_NAME")]
        name: String,
        #[arg(long, env = "IS_LOCAL", default_value = "false")]
        is_local: String,
    },

    /// Run the full scan pipeline for one scan.
    #[command(name = "run_initiate_scan")]
    RunInitiateScan {
        #[arg(long)]
        scan_id: i64,
        #[arg(long)]
        target_name: String,
        #[arg(long)]
        target_id: i64,
        #[arg(long)]
        scan_workspace_dir: String,
        #[arg(long)]
        engine_name: String,
        #[arg(long)]
        scheduled_scan_name: Option<String>,
    },

    /// Delete expired scan result directories.
    #[command(name = "run_cleanup")]
    RunCleanup {
        #[arg(long)]
        results_dir: String,
        #[arg(long, default_value_t = 7)]
        retention_days: u32,
    },

    /// Purge targets (and their assets via cascade).
    #[command(name = "run_delete_targets")]
    RunDeleteTargets {
        /// JSON array of target ids.
        #[arg(long)]
        target_ids: String,
    },

    /// Purge organizations.
    #[command(name = "run_delete_organizations")]
    RunDeleteOrganizations {
        /// JSON array of organization ids.
        #[arg(long)]
        organization_ids: String,
    },

    /// Purge scans and their workspaces.
    #[command(name = "run_delete_scans")]
    RunDeleteScans {
        /// JSON array of scan ids.
        #[arg(long)]
        scan_ids: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_ids(raw: &str) -> anyhow::Result<Vec<i64>> {
    serde_json::from_str(raw).context("id list must be a JSON array of integers")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Agent { name, is_local } => {
            heartbeat::run_agent(&name, is_local.eq_ignore_ascii_case("true")).await
        }
        Command::RunInitiateScan {
            scan_id,
            target_name,
            target_id,
            scan_workspace_dir,
            engine_name,
            scheduled_scan_name,
        } => {
            scripts::initiate_scan::run(scripts::initiate_scan::ScanArgs {
                scan_id,
                target_name,
                target_id,
                scan_workspace_dir,
                engine_name,
                scheduled_scan_name,
            })
            .await
        }
        Command::RunCleanup {
            results_dir,
            retention_days,
        } => scripts::cleanup::run(&results_dir, retention_days).await,
        Command::RunDeleteTargets { target_ids } => {
            scripts::delete::run_targets(&parse_ids(&target_ids)?).await
        }
        Command::RunDeleteOrganizations { organization_ids } => {
            scripts::delete::run_organizations(&parse_ids(&organization_ids)?).await
        }
        Command::RunDeleteScans { scan_ids } => {
            scripts::delete::run_scans(&parse_ids(&scan_ids)?).await
        }
    }
}
