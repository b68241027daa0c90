// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xr-dispatch: load-aware task distribution.
//!
//! The dispatcher reads the durable worker inventory, filters it through
//! live telemetry, scores the survivors (cpu·0.7 + mem·0.3, lower wins)
//! and launches the task container on the winner — directly for local
//! workers, over SSH for remote ones. Containers are fire-and-forget:
//! `docker run -d` hands back a container id and the scan proceeds on
//! the worker.

mod background;
mod config;
mod directory;
mod docker;
mod dispatcher;
mod error;
mod signals;
pub mod transport;
mod workers;

pub use background::BackgroundTasks;
pub use config::DispatchConfig;
pub use directory::WorkerDirectory;
#[cfg(any(test, feature = "test-support"))]
pub use directory::MemoryDirectory;
pub use docker::{build_docker_command, ScriptModule};
pub use dispatcher::{DeleteKind, ScanFlowArgs, Submission, TaskDispatcher, WorkerOutcome};
pub use error::DispatchError;
pub use signals::{DispatchSignals, TracingSignals};
#[cfg(any(test, feature = "test-support"))]
pub use signals::RecordingSignals;
pub use workers::WorkerControl;
