// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Site scan stage: candidate hosts (root domain, subdomains, open
//! host:port pairs) probed by httpx, streamed into website records.

use super::{join_tools, PipelineContext, StageReport, ToolOutcome};
use crate::commands::{build_scan_command, CommandParams};
use crate::ingest::{self, stream_batches};
use crate::{timeout, workspace, PipelineError};
use futures_util::stream;
use futures_util::StreamExt;
use tokio::task::JoinSet;
use xr_core::ScanStage;
use xr_exec::StreamRequest;

const BATCH_SIZE: usize = 50;

pub(crate) async fn run(ctx: &PipelineContext) -> Result<StageReport, PipelineError> {
    let stage = ScanStage::SiteScan;
    let tools = ctx.engine.tools(stage);
    if tools.is_empty() {
        return Ok(StageReport::short_circuit(stage, 0));
    }
    let dir = workspace::ensure_stage_dir(&ctx.workspace_dir, stage).await?;

    let input_file = dir.join("input_sites.txt");
    let roots = stream::iter(vec![Ok::<String, xr_store::StoreError>(
        ctx.target_name.clone(),
    )]);
    let names = ctx
        .stores
        .subdomains
        .names_for_export(ctx.target_id, xr_store::EXPORT_CHUNK);
    let pairs = ctx
        .stores
        .host_ports
        .pairs_for_export(ctx.target_id, xr_store::EXPORT_CHUNK);
    let input_count = workspace::write_lines(&input_file, roots.chain(names).chain(pairs)).await?;

    let mut set = JoinSet::new();
    let mut failed = std::collections::HashMap::new();
    for (tool, config) in tools {
        let params = CommandParams {
            input_file: Some(input_file.display().to_string()),
            ..CommandParams::default()
        };
        let command = match build_scan_command(stage, &tool, &params, &config) {
            Ok(command) => command,
            Err(e) => {
                failed.insert(tool, ToolOutcome::build_failure(&e));
                continue;
            }
        };
        let timeout = match timeout::resolve_timeout(&tool, &config, &input_file) {
            Ok(timeout) => timeout,
            Err(e) => {
                failed.insert(tool, ToolOutcome::build_failure(&e));
                continue;
            }
        };
        let log_file = workspace::tool_log_path(&dir, &tool);

        let executor = ctx.executor.clone();
        let snapshots = ctx.stores.snapshots.clone();
        let (scan_id, target_id) = (ctx.scan_id, ctx.target_id);
        let stage_dir = dir.clone();
        set.spawn(async move {
            let mut outcome = ToolOutcome::new(&command, timeout, "streaming", Some(&log_file));
            let request = StreamRequest::new(&tool, &command)
                .cwd(&stage_dir)
                .timeout(timeout)
                .log_file(&log_file);
            let mut stream = executor.execute_stream(request);

            let flush_snapshots = snapshots.clone();
            let ingest_result = stream_batches(
                &mut stream,
                BATCH_SIZE,
                |line| ingest::httpx::parse_line(target_id, line),
                move |batch| {
                    let snapshots = flush_snapshots.clone();
                    async move { snapshots.save_and_sync_websites(scan_id, &batch).await }
                },
            )
            .await;

            match ingest_result {
                Ok(stats) => {
                    outcome.processed = Some(stats.processed);
                    outcome.saved = Some(stats.saved);
                }
                Err(e) => outcome.error = Some(e.to_string()),
            }

            match stream.finish().await {
                Ok(exec) => {
                    outcome.exit_code = Some(exec.exit_code);
                    outcome.duration_secs = Some(exec.duration.as_secs_f64());
                }
                Err(e) => {
                    if outcome.error.is_none() && outcome.processed.unwrap_or(0) == 0 {
                        outcome.error = Some(e.to_string());
                    }
                }
            }
            (tool, outcome)
        });
    }

    let mut tool_results = join_tools(ctx, set).await?;
    tool_results.extend(failed);
    Ok(StageReport::from_tools(stage, input_count, tool_results))
}
