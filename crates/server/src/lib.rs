// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xr-server: the control plane workers speak to.
//!
//! Registration, heartbeats, the config center and scan submission. The
//! heartbeat handler stays a sink: telemetry write, pure state-machine
//! advance, then any SSH work goes to the background runner under the
//! update lock.

pub mod routes;
pub mod settings;
pub mod state;

pub use routes::build_router;
pub use settings::Settings;
pub use state::AppState;
