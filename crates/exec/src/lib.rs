// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xr-exec: subprocess lifecycle for external scan tools.
//!
//! Two execution modes, both load-gated and both guaranteeing that the
//! spawned process tree is gone when the caller is done:
//!
//! - [`CommandExecutor::execute_and_wait`] — run to completion, tee
//!   output to a log file, enforce a wall-clock timeout.
//! - [`CommandExecutor::execute_stream`] — yield sanitized stdout lines
//!   one at a time; dropping the stream kills the process group.
//!
//! Every child is spawned as the leader of a fresh process group so a
//! single `SIGKILL` to the group reaps shell wrappers and their children.

pub mod admission;
mod config;
mod error;
mod executor;
mod logfile;
pub mod sanitize;
mod stream;

pub use admission::active_commands;
pub use config::ExecConfig;
pub use error::ExecError;
pub use executor::{CommandExecutor, ExecOutcome};
pub use logfile::read_log_tail;
pub use stream::{CommandStream, StreamRequest};

use std::time::Duration;

/// Grace period between asking a process to die and forcing the issue.
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Cap on log lines read back for failure reports.
pub const MAX_LOG_TAIL_LINES: usize = 1000;
