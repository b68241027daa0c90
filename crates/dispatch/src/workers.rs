// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker lifecycle control: registration, deletion, remote update.
//!
//! The heartbeat handler stays a thin sink; version reconciliation is a
//! pure function in xr-core and the SSH work dispatched here runs on the
//! named background runner under the per-worker update lock.

use crate::transport::exec_remote;
use crate::{BackgroundTasks, DispatchError, DispatchSignals};
use std::sync::Arc;
use xr_core::{HeartbeatTransition, WorkerStatus};
use xr_registry::UpdateLock;
use xr_store::{WorkerRepo, WorkerRow};

/// Fixed script locations laid down by the deploy flow.
const UNINSTALL_COMMAND: &str = "bash /opt/xingrin/agent/uninstall.sh";
const UPDATE_COMMAND: &str = "bash /opt/xingrin/agent/update.sh";

#[derive(Clone)]
pub struct WorkerControl<S> {
    repo: WorkerRepo,
    background: BackgroundTasks,
    signals: Arc<S>,
}

impl<S> WorkerControl<S>
where
    S: DispatchSignals + 'static,
{
    pub fn new(repo: WorkerRepo, background: BackgroundTasks, signals: Arc<S>) -> Self {
        Self {
            repo,
            background,
            signals,
        }
    }

    /// Idempotent self-registration by name.
    pub async fn register(
        &self,
        name: &str,
        is_local: bool,
    ) -> Result<(WorkerRow, bool), DispatchError> {
        let (row, created) = self.repo.register(name, is_local).await?;
        if created {
            tracing::info!(worker = name, is_local, "worker registered");
        }
        Ok((row, created))
    }

    /// Delete a worker: purge its telemetry, drop the row, then try a
    /// best-effort remote uninstall in the background.
    pub async fn delete(
        &self,
        worker: WorkerRow,
        liveness: &dyn xr_core::WorkerLiveness,
    ) -> Result<(), DispatchError> {
        let id = worker.worker_id();
        liveness.delete(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(worker = %worker.name, "worker row deleted");

        if !worker.is_local {
            let signals = self.signals.clone();
            self.background.spawn("worker-uninstall", async move {
                match exec_remote(
                    &worker.ip_address,
                    worker.ssh_port as u16,
                    &worker.username,
                    &worker.password,
                    UNINSTALL_COMMAND,
                )
                .await
                {
                    Ok(output) if output.exit_status == 0 => {
                        tracing::info!(worker = %worker.name, "remote uninstall finished");
                    }
                    Ok(output) => {
                        signals
                            .worker_delete_failed(&worker.name, &output.stderr)
                            .await;
                    }
                    Err(e) => {
                        signals
                            .worker_delete_failed(&worker.name, &e.to_string())
                            .await;
                    }
                }
            });
        }
        Ok(())
    }

    /// Apply a heartbeat transition: persist the status change and, when
    /// the state machine asks for it, kick off a locked remote update.
    pub async fn apply_heartbeat(
        &self,
        worker: &WorkerRow,
        transition: HeartbeatTransition,
        update_lock: &UpdateLock,
    ) -> Result<(), DispatchError> {
        if let Some(next) = transition.next_status {
            self.repo.set_status(worker.worker_id(), next).await?;
        }
        if transition.dispatch_update {
            self.dispatch_remote_update(worker.clone(), update_lock.clone())
                .await?;
        }
        Ok(())
    }

    /// Fire-and-forget remote update, guarded by the distributed lock so
    /// parallel heartbeats cannot start concurrent updates.
    async fn dispatch_remote_update(
        &self,
        worker: WorkerRow,
        lock: UpdateLock,
    ) -> Result<(), DispatchError> {
        let id = worker.worker_id();
        if !lock.try_acquire(id).await? {
            tracing::debug!(worker = %worker.name, "update already in progress");
            return Ok(());
        }

        let repo = self.repo.clone();
        self.background.spawn("worker-update", async move {
            tracing::info!(worker = %worker.name, "starting remote agent update");
            let result = exec_remote(
                &worker.ip_address,
                worker.ssh_port as u16,
                &worker.username,
                &worker.password,
                UPDATE_COMMAND,
            )
            .await;

            match result {
                Ok(output) if output.exit_status == 0 => {
                    // The next heartbeat with the new version flips the
                    // row back to online.
                    tracing::info!(worker = %worker.name, "remote update finished");
                }
                Ok(output) => {
                    tracing::warn!(
                        worker = %worker.name,
                        exit = output.exit_status,
                        stderr = %output.stderr,
                        "remote update failed"
                    );
                    let _ = repo.set_status(id, WorkerStatus::Outdated).await;
                }
                Err(e) => {
                    tracing::warn!(worker = %worker.name, error = %e, "remote update failed");
                    let _ = repo.set_status(id, WorkerStatus::Outdated).await;
                }
            }
            let _ = lock.release(id).await;
        });
        Ok(())
    }
}
