// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

fn source(lines: &[&str]) -> VecSource {
    VecSource(lines.iter().map(|l| l.to_string()).collect::<VecDeque<_>>())
}

#[tokio::test]
async fn flushes_at_batch_boundaries_and_drains_remainder() {
    let flushed: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = flushed.clone();

    let stats = stream_batches(
        &mut source(&["1", "2", "skip", "3", "4", "5"]),
        2,
        |line| line.parse::<u32>().ok(),
        move |batch: Vec<u32>| {
            let sink = sink.clone();
            async move {
                sink.lock().push(batch.len());
                Ok(batch.len() as u64)
            }
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.processed, 5);
    assert_eq!(stats.saved, 5);
    // Two full batches of 2, one trailing batch of 1.
    assert_eq!(*flushed.lock(), vec![2, 2, 1]);
}

#[tokio::test]
async fn flush_failure_propagates() {
    let err = stream_batches(
        &mut source(&["1", "2"]),
        1,
        |line| line.parse::<u32>().ok(),
        |_batch: Vec<u32>| async {
            Err(xr_store::StoreError::NotFound("scan 9".into()))
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PipelineError::Store(_)), "got: {err}");
}

#[tokio::test]
async fn empty_source_flushes_nothing() {
    let stats = stream_batches(
        &mut source(&[]),
        10,
        |line| Some(line.to_string()),
        |_batch: Vec<String>| async { panic!("flush must not run for an empty source") },
    )
    .await
    .unwrap();
    assert_eq!(stats, IngestStats::default());
}
