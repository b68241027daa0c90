// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker inventory capability.

use crate::DispatchError;
use async_trait::async_trait;
use xr_store::{WorkerRepo, WorkerRow};

/// Source of scheduling candidates: deployed worker rows, before the
/// liveness filter.
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    async fn deployed_workers(&self) -> Result<Vec<WorkerRow>, DispatchError>;
}

#[async_trait]
impl WorkerDirectory for WorkerRepo {
    async fn deployed_workers(&self) -> Result<Vec<WorkerRow>, DispatchError> {
        Ok(self.list_deployed().await?)
    }
}

/// Fixed in-memory inventory for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    rows: std::sync::Arc<parking_lot::Mutex<Vec<WorkerRow>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryDirectory {
    pub fn new(rows: Vec<WorkerRow>) -> Self {
        Self {
            rows: std::sync::Arc::new(parking_lot::Mutex::new(rows)),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl WorkerDirectory for MemoryDirectory {
    async fn deployed_workers(&self) -> Result<Vec<WorkerRow>, DispatchError> {
        Ok(self.rows.lock().clone())
    }
}
