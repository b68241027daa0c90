// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Load-aware worker selection and task submission.

use crate::docker::{build_docker_command, ScriptModule};
use crate::transport::launch_container;
use crate::{DispatchConfig, DispatchError, DispatchSignals, WorkerDirectory};
use parking_lot::Mutex;
use std::time::Instant;
use xr_core::{LoadSample, ScanId, TargetId, WorkerId, WorkerLiveness};
use xr_store::WorkerRow;

/// Last dispatch timestamp, shared by every dispatcher in the process.
/// The submit-interval throttle is best-effort, not a barrier.
static LAST_SUBMIT_AT: Mutex<Option<Instant>> = Mutex::new(None);

/// Result of a successful task submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub message: String,
    pub container_id: String,
    pub worker_id: WorkerId,
}

/// Per-worker result of a fleet-wide operation.
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub success: bool,
    pub output: String,
}

/// Id lists accepted by the fleet delete entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    Targets,
    Organizations,
    Scans,
}

impl DeleteKind {
    fn module(&self) -> ScriptModule {
        match self {
            DeleteKind::Targets => ScriptModule::RunDeleteTargets,
            DeleteKind::Organizations => ScriptModule::RunDeleteOrganizations,
            DeleteKind::Scans => ScriptModule::RunDeleteScans,
        }
    }

    fn param(&self) -> &'static str {
        match self {
            DeleteKind::Targets => "target_ids",
            DeleteKind::Organizations => "organization_ids",
            DeleteKind::Scans => "scan_ids",
        }
    }
}

/// Arguments for a scan-flow submission.
#[derive(Debug, Clone)]
pub struct ScanFlowArgs {
    pub scan_id: ScanId,
    pub target_name: String,
    pub target_id: TargetId,
    pub scan_workspace_dir: String,
    pub engine_name: String,
    pub scheduled_scan_name: Option<String>,
}

pub struct TaskDispatcher<D, L, S> {
    cfg: DispatchConfig,
    directory: D,
    liveness: L,
    signals: S,
}

impl<D, L, S> TaskDispatcher<D, L, S>
where
    D: WorkerDirectory,
    L: WorkerLiveness,
    S: DispatchSignals,
{
    pub fn new(cfg: DispatchConfig, directory: D, liveness: L, signals: S) -> Self {
        Self {
            cfg,
            directory,
            liveness,
            signals,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.cfg
    }

    /// Deployed workers that currently have a TTL-valid heartbeat.
    pub async fn online_workers(&self) -> Result<Vec<WorkerRow>, DispatchError> {
        let deployed = self.directory.deployed_workers().await?;
        let mut online = Vec::with_capacity(deployed.len());
        for worker in deployed {
            if self.liveness.is_online(worker.worker_id()).await? {
                online.push(worker);
            }
        }
        Ok(online)
    }

    /// Pick the least-loaded online worker.
    ///
    /// Workers over the load threshold are held back; when nothing else
    /// is available the scheduler waits out `high_load_wait`, emits the
    /// high-load event once, and settles for the least-bad node.
    pub async fn select_best_worker(&self) -> Result<Option<WorkerRow>, DispatchError> {
        let workers = self.online_workers().await?;
        if workers.is_empty() {
            tracing::warn!("no online workers available");
            return Ok(None);
        }

        let ids: Vec<WorkerId> = workers.iter().map(|w| w.worker_id()).collect();
        let loads = self.liveness.get_all(&ids).await?;

        let mut normal: Vec<(WorkerRow, LoadSample)> = Vec::new();
        let mut overloaded: Vec<(WorkerRow, LoadSample)> = Vec::new();
        for worker in workers {
            let Some(sample) = loads.get(&worker.worker_id()).copied() else {
                tracing::warn!(worker = %worker.name, "no telemetry for online worker, skipping");
                continue;
            };
            if sample.is_overloaded() {
                tracing::debug!(
                    worker = %worker.name,
                    cpu = %format_args!("{:.1}", sample.cpu_percent),
                    mem = %format_args!("{:.1}", sample.mem_percent),
                    "worker over load threshold"
                );
                overloaded.push((worker, sample));
            } else {
                normal.push((worker, sample));
            }
        }

        if let Some((worker, sample)) = take_min_by_score(normal) {
            tracing::info!(
                worker = %worker.name,
                cpu = %format_args!("{:.1}", sample.cpu_percent),
                mem = %format_args!("{:.1}", sample.mem_percent),
                score = %format_args!("{:.1}", sample.score()),
                "selected worker"
            );
            return Ok(Some(worker));
        }

        if overloaded.is_empty() {
            tracing::warn!("no worker has usable telemetry");
            return Ok(None);
        }

        // Degraded path: give the fleet a breather, then take the least
        // loaded of the overloaded set. The event fires exactly once per
        // scheduling call, after the wait.
        tracing::warn!(
            wait_s = self.cfg.high_load_wait.as_secs(),
            "all workers high load, waiting before degraded selection"
        );
        tokio::time::sleep(self.cfg.high_load_wait).await;

        let Some((worker, sample)) = take_min_by_score(overloaded) else {
            return Ok(None);
        };
        self.signals
            .all_workers_high_load(&worker.name, sample.cpu_percent, sample.mem_percent)
            .await;
        tracing::info!(
            worker = %worker.name,
            cpu = %format_args!("{:.1}", sample.cpu_percent),
            mem = %format_args!("{:.1}", sample.mem_percent),
            "selected worker under high load"
        );
        Ok(Some(worker))
    }

    /// Space consecutive dispatches at least `submit_interval` apart so
    /// the heartbeat after a launch can influence the next selection.
    pub async fn wait_for_submit_interval(&self) {
        let wait = {
            let last = LAST_SUBMIT_AT.lock();
            last.map(|at| self.cfg.submit_interval.saturating_sub(at.elapsed()))
        };
        if let Some(wait) = wait {
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
        *LAST_SUBMIT_AT.lock() = Some(Instant::now());
    }

    /// Submit the scan flow to the best worker.
    pub async fn submit_scan(&self, args: ScanFlowArgs) -> Result<Submission, DispatchError> {
        tracing::info!(
            scan_id = %args.scan_id,
            target = %args.target_name,
            engine = %args.engine_name,
            image = %self.cfg.docker_image,
            "submitting scan flow"
        );

        self.wait_for_submit_interval().await;

        let worker = self
            .select_best_worker()
            .await?
            .ok_or(DispatchError::NoWorker)?;

        let mut script_args: Vec<(&str, String)> = vec![
            ("scan_id", args.scan_id.to_string()),
            ("target_name", args.target_name.clone()),
            ("target_id", args.target_id.to_string()),
            ("scan_workspace_dir", args.scan_workspace_dir.clone()),
            ("engine_name", args.engine_name.clone()),
        ];
        if let Some(name) = &args.scheduled_scan_name {
            script_args.push(("scheduled_scan_name", name.clone()));
        }

        let docker_cmd =
            build_docker_command(&self.cfg, &worker, ScriptModule::RunInitiateScan, &script_args);
        let container_id = launch_container(&worker, &docker_cmd).await?;

        Ok(Submission {
            message: format!("task submitted to {}", worker.name),
            container_id: container_id.chars().take(12).collect(),
            worker_id: worker.worker_id(),
        })
    }

    /// Run the cleanup module on every online worker, collecting
    /// per-worker outcomes. One worker failing never aborts the sweep.
    pub async fn cleanup_all_workers(&self, retention_days: u32) -> Result<Vec<WorkerOutcome>, DispatchError> {
        let workers = self.online_workers().await?;
        if workers.is_empty() {
            tracing::warn!("no online workers for cleanup");
            return Ok(Vec::new());
        }
        tracing::info!(count = workers.len(), retention_days, "starting fleet cleanup");

        let mut outcomes = Vec::with_capacity(workers.len());
        for worker in workers {
            let script_args: Vec<(&str, String)> = vec![
                ("results_dir", self.cfg.container_results_mount.clone()),
                ("retention_days", retention_days.to_string()),
            ];
            let docker_cmd =
                build_docker_command(&self.cfg, &worker, ScriptModule::RunCleanup, &script_args);
            match launch_container(&worker, &docker_cmd).await {
                Ok(container_id) => outcomes.push(WorkerOutcome {
                    worker_id: worker.worker_id(),
                    worker_name: worker.name.clone(),
                    success: true,
                    output: container_id,
                }),
                Err(e) => {
                    tracing::warn!(worker = %worker.name, error = %e, "cleanup launch failed");
                    outcomes.push(WorkerOutcome {
                        worker_id: worker.worker_id(),
                        worker_name: worker.name.clone(),
                        success: false,
                        output: e.to_string(),
                    });
                }
            }
        }
        Ok(outcomes)
    }

    /// Dispatch a bulk delete task to the best worker.
    pub async fn dispatch_delete(
        &self,
        kind: DeleteKind,
        ids: &[i64],
    ) -> Result<Submission, DispatchError> {
        let worker = self
            .select_best_worker()
            .await?
            .ok_or(DispatchError::NoWorker)?;

        let payload = serde_json::to_string(ids)
            .map_err(|e| DispatchError::Config(format!("encode id list: {e}")))?;
        let script_args: Vec<(&str, String)> = vec![(kind.param(), payload)];

        let docker_cmd = build_docker_command(&self.cfg, &worker, kind.module(), &script_args);
        let container_id = launch_container(&worker, &docker_cmd).await?;

        tracing::info!(
            kind = ?kind,
            count = ids.len(),
            worker = %worker.name,
            "delete task dispatched"
        );
        Ok(Submission {
            message: format!("task submitted to {}", worker.name),
            container_id,
            worker_id: worker.worker_id(),
        })
    }
}

/// Minimum by weighted score; ties keep the earliest row (stable for a
/// fixed telemetry snapshot).
fn take_min_by_score(mut scored: Vec<(WorkerRow, LoadSample)>) -> Option<(WorkerRow, LoadSample)> {
    if scored.is_empty() {
        return None;
    }
    let mut best = 0;
    for i in 1..scored.len() {
        if scored[i].1.score() < scored[best].1.score() {
            best = i;
        }
    }
    Some(scored.swap_remove(best))
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
