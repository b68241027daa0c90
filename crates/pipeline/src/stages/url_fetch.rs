// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! URL fetch stage: crawl and archive tools over the known websites,
//! output files parsed into bare endpoint records.

use super::{join_tools, PipelineContext, StageReport, ToolOutcome};
use crate::commands::{build_scan_command, CommandParams};
use crate::{ingest, timeout, workspace, PipelineError};
use tokio::task::JoinSet;
use xr_core::ScanStage;

pub(crate) async fn run(ctx: &PipelineContext) -> Result<StageReport, PipelineError> {
    let stage = ScanStage::UrlFetch;
    let tools = ctx.engine.tools(stage);
    if tools.is_empty() {
        return Ok(StageReport::short_circuit(stage, 0));
    }
    let dir = workspace::ensure_stage_dir(&ctx.workspace_dir, stage).await?;

    let input_file = dir.join("input_websites.txt");
    let urls = ctx
        .stores
        .websites
        .urls_for_export(ctx.target_id, xr_store::EXPORT_CHUNK);
    let input_count = workspace::write_lines(&input_file, urls).await?;
    if input_count == 0 {
        tracing::warn!("no websites to crawl, skipping url fetch");
        return Ok(StageReport::short_circuit(stage, 0));
    }

    let mut set = JoinSet::new();
    let mut failed = std::collections::HashMap::new();
    for (tool, config) in tools {
        let output_file = dir.join(format!("{tool}_output.txt"));
        let params = CommandParams {
            input_file: Some(input_file.display().to_string()),
            output_file: Some(output_file.display().to_string()),
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
        set.spawn(async move {
            let mut outcome = ToolOutcome::new(&command, timeout, "wait", Some(&log_file));
            match executor
                .execute_and_wait(&tool, &command, timeout, Some(&log_file))
                .await
            {
                Ok(exec) => {
                    outcome.exit_code = Some(exec.exit_code);
                    outcome.duration_secs = Some(exec.duration.as_secs_f64());
                    let lines = workspace::read_output_lines(&output_file)
                        .await
                        .unwrap_or_default();
                    let records: Vec<_> = lines
                        .iter()
                        .filter_map(|line| ingest::urls::parse_line(target_id, line))
                        .collect();
                    outcome.processed = Some(records.len() as u64);
                    match snapshots.save_and_sync_endpoints(scan_id, &records).await {
                        Ok(saved) => outcome.saved = Some(saved),
                        Err(e) => outcome.error = Some(e.to_string()),
                    }
                    if !exec.success && records.is_empty() && outcome.error.is_none() {
                        outcome.error = Some(format!("exit code {}", exec.exit_code));
                    }
                }
                Err(e) => outcome.error = Some(e.to_string()),
            }
            (tool, outcome)
        });
    }

    let mut tool_results = join_tools(ctx, set).await?;
    tool_results.extend(failed);
    Ok(StageReport::from_tools(stage, input_count, tool_results))
}
