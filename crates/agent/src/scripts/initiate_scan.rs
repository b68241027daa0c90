// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scan flow entrypoint: load the scan and its engine config, run
//! the stage graph, and record the terminal status.

use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use xr_core::{ScanId, ScanStatus, TargetId};
use xr_exec::{CommandExecutor, ExecConfig};
use xr_pipeline::{
    run_pipeline, EngineConfig, PipelineContext, PipelineError, StoreTemplateCatalog,
};

#[derive(Debug)]
pub struct ScanArgs {
    pub scan_id: i64,
    pub target_name: String,
    pub target_id: i64,
    pub scan_workspace_dir: String,
    pub engine_name: String,
    pub scheduled_scan_name: Option<String>,
}

pub async fn run(args: ScanArgs) -> anyhow::Result<()> {
    tracing::info!(
        scan_id = args.scan_id,
        target = %args.target_name,
        engine = %args.engine_name,
        scheduled = args.scheduled_scan_name.as_deref().unwrap_or(""),
        "scan flow starting"
    );

    let (config, stores) = super::bootstrap().await?;
    let scan_id = ScanId::new(args.scan_id);

    let engine_row = stores.engines.get_by_name(&args.engine_name).await?;
    let engine = EngineConfig::parse(&engine_row.configuration)?;
    stores.scans.set_status(scan_id, ScanStatus::Running).await?;

    let workspace_dir = PathBuf::from(&config.paths.results).join(&args.scan_workspace_dir);
    tokio::fs::create_dir_all(&workspace_dir).await?;

    let mut exec_config = ExecConfig::from_env();
    exec_config.command_logging = config.logging.enable_command_logging;

    let cancel = CancellationToken::new();
    spawn_signal_listener(cancel.clone());

    let ctx = PipelineContext {
        scan_id,
        target_id: TargetId::new(args.target_id),
        target_name: args.target_name.clone(),
        workspace_dir,
        engine,
        stores: stores.clone(),
        executor: CommandExecutor::new(exec_config),
        templates: Arc::new(StoreTemplateCatalog::new(stores.template_repos.clone())),
        cancel: cancel.clone(),
    };

    match run_pipeline(&ctx).await {
        Ok(report) => {
            let failed_stages: Vec<&str> = report
                .stages
                .iter()
                .filter(|s| !s.success)
                .map(|s| s.stage.as_str())
                .collect();
            if failed_stages.is_empty() {
                stores.scans.set_status(scan_id, ScanStatus::Completed).await?;
                tracing::info!(scan_id = args.scan_id, "scan completed");
            } else {
                let message = format!("stages failed: {}", failed_stages.join(", "));
                stores.scans.set_failed(scan_id, &message).await?;
                tracing::warn!(scan_id = args.scan_id, message, "scan finished with failures");
            }
            Ok(())
        }
        Err(PipelineError::Cancelled) => {
            stores.scans.set_status(scan_id, ScanStatus::Cancelled).await?;
            tracing::info!(scan_id = args.scan_id, "scan cancelled");
            Ok(())
        }
        Err(e) => {
            stores.scans.set_failed(scan_id, &e.to_string()).await?;
            Err(e.into())
        }
    }
}

/// SIGTERM/SIGINT cancel the scan; committed batches stay committed.
fn spawn_signal_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate => {}
        }
        tracing::info!("termination signal received, cancelling scan");
        cancel.cancel();
    });
}
