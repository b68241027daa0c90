// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named background task runner.
//!
//! Request handlers never spawn naked tasks: fire-and-forget work
//! (remote uninstall, remote update) lands here so shutdown can cancel
//! and drain it deterministically.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

#[derive(Clone)]
pub struct BackgroundTasks {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Spawn a named task. It is cancelled (dropped at the next await
    /// point) when shutdown begins.
    pub fn spawn<F>(&self, name: &'static str, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = fut => {
                    tracing::debug!(task = name, "background task finished");
                }
                _ = token.cancelled() => {
                    tracing::info!(task = name, "background task cancelled at shutdown");
                }
            }
        });
    }

    /// Cancel everything and wait up to `drain` for tasks to unwind.
    pub async fn shutdown(&self, drain: Duration) {
        self.token.cancel();
        self.tracker.close();
        if tokio::time::timeout(drain, self.tracker.wait()).await.is_err() {
            tracing::warn!(drain_ms = drain.as_millis() as u64, "background tasks did not drain in time");
        }
    }
}

#[cfg(test)]
#[path = "background_tests.rs"]
mod tests;
