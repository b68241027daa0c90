// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming ingestion framework.
//!
//! A parser turns sanitized output lines into records; [`stream_batches`]
//! buffers records to the batch size and flushes each full batch to the
//! store. Malformed lines are skipped at debug level — tools interleave
//! banners and warnings with results and a parser must outlive all of
//! it. A flush failure propagates, which drops the stream and kills the
//! subprocess.

pub mod dalfox;
pub mod ffuf;
pub mod httpx;
pub mod naabu;
pub mod nuclei;
pub mod subfinder;
pub mod urls;

use crate::PipelineError;
use async_trait::async_trait;
use std::future::Future;
use xr_exec::CommandStream;
use xr_store::StoreError;

/// Anything that can be drained line by line.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> Option<String>;
}

#[async_trait]
impl LineSource for CommandStream {
    async fn next_line(&mut self) -> Option<String> {
        CommandStream::next_line(self).await
    }
}

/// Line vector source for parser tests.
#[cfg(test)]
pub(crate) struct VecSource(pub std::collections::VecDeque<String>);

#[cfg(test)]
#[async_trait]
impl LineSource for VecSource {
    async fn next_line(&mut self) -> Option<String> {
        self.0.pop_front()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Lines that parsed into a record.
    pub processed: u64,
    /// Rows the store acknowledged.
    pub saved: u64,
}

/// Drain `source`, batching parsed records and flushing every
/// `batch_size`. The trailing partial batch flushes at end of stream.
pub async fn stream_batches<S, T, P, F, Fut>(
    source: &mut S,
    batch_size: usize,
    mut parse: P,
    mut flush: F,
) -> Result<IngestStats, PipelineError>
where
    S: LineSource,
    P: FnMut(&str) -> Option<T> + Send,
    F: FnMut(Vec<T>) -> Fut + Send,
    Fut: Future<Output = Result<u64, StoreError>> + Send,
    T: Send,
{
    let batch_size = batch_size.max(1);
    let mut stats = IngestStats::default();
    let mut buffer: Vec<T> = Vec::with_capacity(batch_size);

    while let Some(line) = source.next_line().await {
        let Some(record) = parse(&line) else {
            tracing::debug!(line = %line.chars().take(200).collect::<String>(), "skipping unparseable line");
            continue;
        };
        stats.processed += 1;
        buffer.push(record);
        if buffer.len() >= batch_size {
            stats.saved += flush(std::mem::take(&mut buffer)).await?;
        }
    }

    if !buffer.is_empty() {
        stats.saved += flush(buffer).await?;
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
