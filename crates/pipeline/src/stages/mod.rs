// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage orchestration.
//!
//! Group 1 runs sequentially (each stage feeds the next's exports),
//! group 2 runs url fetch and directory fuzzing concurrently, group 3
//! closes with the vulnerability scan. Stage boundaries write progress
//! and current-stage back to the scan row; cached asset counts refresh
//! once at the end.

mod directory_scan;
mod port_scan;
mod site_scan;
mod subdomain_discovery;
mod url_fetch;
mod vuln_scan;

use crate::{EngineConfig, PipelineError, TemplateCatalog};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use xr_core::{ScanId, ScanStage, TargetId};
use xr_exec::CommandExecutor;
use xr_store::Stores;

/// Everything a stage needs to run.
pub struct PipelineContext {
    pub scan_id: ScanId,
    pub target_id: TargetId,
    pub target_name: String,
    pub workspace_dir: PathBuf,
    pub engine: EngineConfig,
    pub stores: Stores,
    pub executor: CommandExecutor,
    pub templates: Arc<dyn TemplateCatalog>,
    pub cancel: CancellationToken,
}

/// Result of one tool run within a stage.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub command: String,
    pub timeout_secs: u64,
    pub mode: &'static str,
    pub duration_secs: Option<f64>,
    pub exit_code: Option<i32>,
    pub processed: Option<u64>,
    pub saved: Option<u64>,
    pub log_file: Option<String>,
    pub error: Option<String>,
}

impl ToolOutcome {
    pub(crate) fn new(
        command: &str,
        timeout: Duration,
        mode: &'static str,
        log_file: Option<&Path>,
    ) -> Self {
        Self {
            command: command.to_string(),
            timeout_secs: timeout.as_secs(),
            mode,
            duration_secs: None,
            exit_code: None,
            processed: None,
            saved: None,
            log_file: log_file.map(|p| p.display().to_string()),
            error: None,
        }
    }

    /// A tool that never launched (bad template, bad timeout config).
    pub(crate) fn build_failure(error: &PipelineError) -> Self {
        Self {
            command: String::new(),
            timeout_secs: 0,
            mode: "none",
            duration_secs: None,
            exit_code: None,
            processed: None,
            saved: None,
            log_file: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one stage.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: ScanStage,
    pub success: bool,
    /// Lines in the stage's input export (domain stages report 1).
    pub input_count: u64,
    pub tool_results: HashMap<String, ToolOutcome>,
}

impl StageReport {
    /// Stage with no enabled tools, or with an empty input export.
    pub(crate) fn short_circuit(stage: ScanStage, input_count: u64) -> Self {
        Self {
            stage,
            success: true,
            input_count,
            tool_results: HashMap::new(),
        }
    }

    pub(crate) fn from_tools(
        stage: ScanStage,
        input_count: u64,
        tool_results: HashMap<String, ToolOutcome>,
    ) -> Self {
        let success = tool_results.is_empty() || tool_results.values().any(ToolOutcome::is_usable);
        Self {
            stage,
            success,
            input_count,
            tool_results,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub scan_id: ScanId,
    pub stages: Vec<StageReport>,
}

/// Run the whole scan graph.
pub async fn run_pipeline(ctx: &PipelineContext) -> Result<PipelineReport, PipelineError> {
    let mut stages = Vec::with_capacity(6);

    check_cancelled(ctx)?;
    let report = subdomain_discovery::run(ctx).await?;
    finish_stage(ctx, &report).await?;
    stages.push(report);

    check_cancelled(ctx)?;
    let report = port_scan::run(ctx).await?;
    finish_stage(ctx, &report).await?;
    stages.push(report);

    check_cancelled(ctx)?;
    let report = site_scan::run(ctx).await?;
    finish_stage(ctx, &report).await?;
    stages.push(report);

    check_cancelled(ctx)?;
    let (url_report, dir_report) = tokio::join!(url_fetch::run(ctx), directory_scan::run(ctx));
    let url_report = url_report?;
    let dir_report = dir_report?;
    finish_stage(ctx, &url_report).await?;
    finish_stage(ctx, &dir_report).await?;
    stages.push(url_report);
    stages.push(dir_report);

    check_cancelled(ctx)?;
    let vuln_report = vuln_scan::run(ctx).await?;
    finish_stage(ctx, &vuln_report).await?;
    stages.push(vuln_report);

    refresh_counts(ctx).await?;
    Ok(PipelineReport {
        scan_id: ctx.scan_id,
        stages,
    })
}

fn check_cancelled(ctx: &PipelineContext) -> Result<(), PipelineError> {
    if ctx.cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    Ok(())
}

async fn finish_stage(ctx: &PipelineContext, report: &StageReport) -> Result<(), PipelineError> {
    tracing::info!(
        stage = %report.stage,
        success = report.success,
        input = report.input_count,
        tools = report.tool_results.len(),
        "stage finished"
    );
    ctx.stores
        .scans
        .set_stage(ctx.scan_id, report.stage, report.stage.progress_after())
        .await?;
    Ok(())
}

async fn refresh_counts(ctx: &PipelineContext) -> Result<(), PipelineError> {
    let subdomains = ctx.stores.subdomains.count_by_target(ctx.target_id).await?;
    let endpoints = ctx.stores.endpoints.count_by_target(ctx.target_id).await?;
    let vulnerabilities = ctx
        .stores
        .vulnerabilities
        .count_by_target(ctx.target_id)
        .await?;
    ctx.stores
        .scans
        .update_counts(ctx.scan_id, subdomains, endpoints, vulnerabilities)
        .await?;
    Ok(())
}

/// Await every tool task, honoring cancellation: a cancelled scan aborts
/// the remaining tasks, whose dropped command streams kill their
/// subprocess groups.
pub(crate) async fn join_tools(
    ctx: &PipelineContext,
    mut set: JoinSet<(String, ToolOutcome)>,
) -> Result<HashMap<String, ToolOutcome>, PipelineError> {
    let mut results = HashMap::new();
    loop {
        tokio::select! {
            _ = ctx.cancel.cancelled() => {
                set.abort_all();
                while set.join_next().await.is_some() {}
                return Err(PipelineError::Cancelled);
            }
            next = set.join_next() => match next {
                None => break,
                Some(Ok((tool, outcome))) => {
                    if let Some(error) = &outcome.error {
                        tracing::warn!(tool = %tool, error = %error, "tool finished with error");
                    }
                    results.insert(tool, outcome);
                }
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "tool task aborted");
                }
            }
        }
    }
    Ok(results)
}
