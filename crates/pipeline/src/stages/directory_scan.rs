// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory scan stage: one fuzzing run per known website, wordlist
//! resolved through the wordlist table.

use super::{join_tools, PipelineContext, StageReport, ToolOutcome};
use crate::commands::{build_scan_command, CommandParams};
use crate::{ingest, timeout, workspace, PipelineError};
use tokio::task::JoinSet;
use xr_core::{ScanStage, WebsiteId};

const DEFAULT_WORDLIST: &str = "common";

pub(crate) async fn run(ctx: &PipelineContext) -> Result<StageReport, PipelineError> {
    let stage = ScanStage::DirectoryScan;
    let tools = ctx.engine.tools(stage);
    if tools.is_empty() {
        return Ok(StageReport::short_circuit(stage, 0));
    }
    let dir = workspace::ensure_stage_dir(&ctx.workspace_dir, stage).await?;

    let websites = ctx.stores.websites.list_for_target(ctx.target_id).await?;
    if websites.is_empty() {
        tracing::warn!("no websites to fuzz, skipping directory scan");
        return Ok(StageReport::short_circuit(stage, 0));
    }
    let input_count = websites.len() as u64;

    let mut set = JoinSet::new();
    let mut failed = std::collections::HashMap::new();
    for (tool, config) in tools {
        // Wordlist names resolve to registered files; a missing row is a
        // configuration problem for this tool only.
        let wordlist_name = config
            .get("wordlist")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_WORDLIST)
            .to_string();
        let wordlist = match ctx.stores.wordlists.get_by_name(&wordlist_name).await {
            Ok(row) => row.file_path,
            Err(e) => {
                failed.insert(
                    tool,
                    ToolOutcome::build_failure(&PipelineError::Config(format!(
                        "wordlist {wordlist_name}: {e}"
                    ))),
                );
                continue;
            }
        };

        let executor = ctx.executor.clone();
        let snapshots = ctx.stores.snapshots.clone();
        let (scan_id, target_id) = (ctx.scan_id, ctx.target_id);
        let stage_dir = dir.clone();
        let sites = websites.clone();
        let tool_name = tool.clone();
        let log_file = workspace::tool_log_path(&dir, &tool);

        set.spawn(async move {
            let mut outcome = ToolOutcome::new("", std::time::Duration::ZERO, "wait", Some(&log_file));
            let mut processed = 0u64;
            let mut saved = 0u64;
            let mut last_error = None;

            for (website_id, site_url) in sites {
                let output_file = stage_dir.join(format!("{tool_name}_{website_id}.json"));
                let params = CommandParams {
                    site_url: Some(site_url.trim_end_matches('/').to_string()),
                    wordlist: Some(wordlist.clone()),
                    output_file: Some(output_file.display().to_string()),
                    ..CommandParams::default()
                };
                let command = match build_scan_command(ScanStage::DirectoryScan, &tool_name, &params, &config)
                {
                    Ok(command) => command,
                    Err(e) => {
                        last_error = Some(e.to_string());
                        break;
                    }
                };
                let tool_timeout =
                    match timeout::resolve_timeout(&tool_name, &config, &output_file) {
                        Ok(t) => t,
                        Err(e) => {
                            last_error = Some(e.to_string());
                            break;
                        }
                    };
                if outcome.command.is_empty() {
                    outcome.command = command.clone();
                    outcome.timeout_secs = tool_timeout.as_secs();
                }

                match executor
                    .execute_and_wait(&tool_name, &command, tool_timeout, Some(&log_file))
                    .await
                {
                    Ok(_exec) => {
                        let contents = tokio::fs::read_to_string(&output_file)
                            .await
                            .unwrap_or_default();
                        let records = ingest::ffuf::parse_output(
                            target_id,
                            WebsiteId::new(website_id),
                            &contents,
                        );
                        processed += records.len() as u64;
                        match snapshots.save_and_sync_directories(scan_id, &records).await {
                            Ok(n) => saved += n,
                            Err(e) => {
                                last_error = Some(e.to_string());
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        // One site timing out must not starve the rest.
                        tracing::warn!(tool = %tool_name, site = %site_url, error = %e, "fuzz run failed");
                        last_error = Some(e.to_string());
                    }
                }
            }

            outcome.processed = Some(processed);
            outcome.saved = Some(saved);
            if processed == 0 {
                outcome.error = last_error;
            }
            (tool_name, outcome)
        });
    }

    let mut tool_results = join_tools(ctx, set).await?;
    tool_results.extend(failed);
    Ok(StageReport::from_tools(stage, input_count, tool_results))
}
