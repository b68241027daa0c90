// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet event notifications.
//!
//! Scheduling and worker lifecycle emit a small set of operator-facing
//! events. The trait keeps the dispatcher free of any concrete
//! notification backend.

use async_trait::async_trait;

#[async_trait]
pub trait DispatchSignals: Send + Sync {
    /// Every scheduling candidate is over the load threshold; the
    /// degraded path picked `worker_name` anyway.
    async fn all_workers_high_load(&self, worker_name: &str, cpu: f64, mem: f64);

    /// Best-effort remote uninstall after a delete did not complete.
    async fn worker_delete_failed(&self, worker_name: &str, message: &str);
}

/// Default backend: structured log events.
#[derive(Debug, Clone, Default)]
pub struct TracingSignals;

#[async_trait]
impl DispatchSignals for TracingSignals {
    async fn all_workers_high_load(&self, worker_name: &str, cpu: f64, mem: f64) {
        tracing::warn!(
            worker = worker_name,
            cpu = %format_args!("{cpu:.1}"),
            mem = %format_args!("{mem:.1}"),
            "all workers high load"
        );
    }

    async fn worker_delete_failed(&self, worker_name: &str, message: &str) {
        tracing::warn!(worker = worker_name, message, "worker remote uninstall failed");
    }
}

/// Capturing backend for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct RecordingSignals {
    pub high_load: std::sync::Arc<parking_lot::Mutex<Vec<(String, f64, f64)>>>,
    pub delete_failed: std::sync::Arc<parking_lot::Mutex<Vec<(String, String)>>>,
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl DispatchSignals for RecordingSignals {
    async fn all_workers_high_load(&self, worker_name: &str, cpu: f64, mem: f64) {
        self.high_load
            .lock()
            .push((worker_name.to_string(), cpu, mem));
    }

    async fn worker_delete_failed(&self, worker_name: &str, message: &str) {
        self.delete_failed
            .lock()
            .push((worker_name.to_string(), message.to_string()));
    }
}
