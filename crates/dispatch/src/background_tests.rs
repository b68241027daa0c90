// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn completed_tasks_drain_cleanly() {
    let tasks = BackgroundTasks::new();
    let done = Arc::new(AtomicBool::new(false));
    let flag = done.clone();
    tasks.spawn("quick", async move {
        flag.store(true, Ordering::SeqCst);
    });
    tasks.shutdown(Duration::from_secs(1)).await;
    assert!(done.load(Ordering::SeqCst));
}

#[tokio::test]
async fn shutdown_cancels_long_running_tasks() {
    let tasks = BackgroundTasks::new();
    let finished = Arc::new(AtomicBool::new(false));
    let flag = finished.clone();
    tasks.spawn("stuck", async move {
        tokio::time::sleep(Duration::from_secs(60)).await;
        flag.store(true, Ordering::SeqCst);
    });

    let start = std::time::Instant::now();
    tasks.shutdown(Duration::from_secs(1)).await;
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(!finished.load(Ordering::SeqCst));
}
