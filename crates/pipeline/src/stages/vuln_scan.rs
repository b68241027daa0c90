// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vulnerability scan stage: endpoint list fanned out to dalfox and
//! nuclei (streaming, batch size 1 so findings land immediately) and
//! crlfuzz (file output).

use super::{join_tools, PipelineContext, StageReport, ToolOutcome};
use crate::commands::{build_scan_command, CommandParams};
use crate::ingest::{self, stream_batches};
use crate::{templates, timeout, workspace, PipelineError, ToolConfig};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use xr_core::{ScanStage, VulnSeverity, VulnerabilityRecord};
use xr_exec::StreamRequest;

/// Findings are rare and expensive; persist each one as it appears.
const STREAM_BATCH_SIZE: usize = 1;

pub(crate) async fn run(ctx: &PipelineContext) -> Result<StageReport, PipelineError> {
    let stage = ScanStage::VulnScan;
    let tools = ctx.engine.tools(stage);
    if tools.is_empty() {
        return Ok(StageReport::short_circuit(stage, 0));
    }
    let dir = workspace::ensure_stage_dir(&ctx.workspace_dir, stage).await?;

    let input_file = dir.join("input_endpoints.txt");
    let urls = ctx
        .stores
        .endpoints
        .urls_for_export(ctx.target_id, xr_store::EXPORT_CHUNK);
    let input_count = workspace::write_lines(&input_file, urls).await?;
    if input_count == 0 {
        tracing::warn!("no endpoints available, skipping vulnerability scan");
        return Ok(StageReport::short_circuit(stage, 0));
    }
    tracing::info!(endpoints = input_count, "starting vulnerability scan");

    let mut set = JoinSet::new();
    let mut failed = std::collections::HashMap::new();
    for (tool, config) in tools {
        // Nuclei runs against one or more named template repositories,
        // each materialized locally and passed as its own -t flag.
        let template_args = if tool == "nuclei" {
            match resolve_template_args(ctx, &config).await {
                Ok(args) => Some(args),
                Err(e) => {
                    failed.insert(tool, ToolOutcome::build_failure(&e));
                    continue;
                }
            }
        } else {
            None
        };

        let output_file = dir.join(format!("{tool}_output.txt"));
        let params = CommandParams {
            input_file: Some(input_file.display().to_string()),
            output_file: Some(output_file.display().to_string()),
            template_args,
            ..CommandParams::default()
        };
        let command = match build_scan_command(stage, &tool, &params, &config) {
            Ok(command) => command,
            Err(e) => {
                failed.insert(tool, ToolOutcome::build_failure(&e));
                continue;
            }
        };
        let tool_timeout = match timeout::resolve_timeout(&tool, &config, &input_file) {
            Ok(t) => t,
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

        let streaming = matches!(tool.as_str(), "dalfox_xss" | "nuclei");
        if streaming {
            set.spawn(async move {
                let mut outcome =
                    ToolOutcome::new(&command, tool_timeout, "streaming", Some(&log_file));
                let request = StreamRequest::new(&tool, &command)
                    .cwd(&stage_dir)
                    .timeout(tool_timeout)
                    .log_file(&log_file);
                let mut stream = executor.execute_stream(request);

                let parse_tool = tool.clone();
                let flush_snapshots = snapshots.clone();
                let ingest_result = stream_batches(
                    &mut stream,
                    STREAM_BATCH_SIZE,
                    |line| match parse_tool.as_str() {
                        "nuclei" => ingest::nuclei::parse_line(target_id, line),
                        _ => ingest::dalfox::parse_line(target_id, line),
                    },
                    move |batch| {
                        let snapshots = flush_snapshots.clone();
                        async move {
                            snapshots.save_and_sync_vulnerabilities(scan_id, &batch).await
                        }
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
        } else {
            set.spawn(async move {
                let mut outcome =
                    ToolOutcome::new(&command, tool_timeout, "wait", Some(&log_file));
                match executor
                    .execute_and_wait(&tool, &command, tool_timeout, Some(&log_file))
                    .await
                {
                    Ok(exec) => {
                        outcome.exit_code = Some(exec.exit_code);
                        outcome.duration_secs = Some(exec.duration.as_secs_f64());
                        let records = parse_crlfuzz_output(target_id, &output_file).await;
                        outcome.processed = Some(records.len() as u64);
                        match snapshots
                            .save_and_sync_vulnerabilities(scan_id, &records)
                            .await
                        {
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
    }

    let mut tool_results = join_tools(ctx, set).await?;
    tool_results.extend(failed);
    Ok(StageReport::from_tools(stage, input_count, tool_results))
}

async fn resolve_template_args(
    ctx: &PipelineContext,
    config: &ToolConfig,
) -> Result<String, PipelineError> {
    let repo_names: Vec<String> = config
        .get("template_repo_names")
        .and_then(|v| v.as_array())
        .map(|names| {
            names
                .iter()
                .filter_map(|n| n.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    if repo_names.is_empty() {
        return Err(PipelineError::Config(
            "nuclei requires template_repo_names".into(),
        ));
    }

    let mut paths: Vec<PathBuf> = Vec::with_capacity(repo_names.len());
    for name in &repo_names {
        let path = ctx.templates.ensure_local(name).await?;
        tracing::info!(repo = %name, path = %path.display(), "nuclei template repo resolved");
        paths.push(path);
    }
    Ok(templates::template_args(&paths))
}

/// crlfuzz `-o` output: one vulnerable url per line.
async fn parse_crlfuzz_output(
    target_id: xr_core::TargetId,
    output_file: &Path,
) -> Vec<VulnerabilityRecord> {
    let lines = workspace::read_output_lines(output_file)
        .await
        .unwrap_or_default();
    lines
        .iter()
        .filter(|l| l.starts_with("http://") || l.starts_with("https://"))
        .map(|url| {
            let mut record = VulnerabilityRecord::new(
                target_id,
                url,
                "crlf_injection",
                VulnSeverity::Medium,
                "crlfuzz",
            );
            record.description = "CRLF injection candidate".into();
            record
        })
        .collect()
}
