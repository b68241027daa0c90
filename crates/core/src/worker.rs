// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker node state machine.
//!
//! Durable worker rows carry a [`WorkerStatus`]; the live/dead decision is
//! made by the load registry TTL, never by this field alone. Heartbeats
//! advance the status through [`advance_on_heartbeat`], a pure function so
//! the HTTP handler stays a thin sink.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Deployment status of a worker node row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Pending,
    Deploying,
    Online,
    Offline,
    Updating,
    Outdated,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Pending => "pending",
            WorkerStatus::Deploying => "deploying",
            WorkerStatus::Online => "online",
            WorkerStatus::Offline => "offline",
            WorkerStatus::Updating => "updating",
            WorkerStatus::Outdated => "outdated",
        }
    }

    /// Whether the node has completed deployment. Only deployed nodes are
    /// scheduling candidates.
    pub fn is_deployed(&self) -> bool {
        matches!(self, WorkerStatus::Online | WorkerStatus::Offline)
    }
}

crate::simple_display! {
    WorkerStatus {
        Pending => "pending",
        Deploying => "deploying",
        Online => "online",
        Offline => "offline",
        Updating => "updating",
        Outdated => "outdated",
    }
}

impl FromStr for WorkerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WorkerStatus::Pending),
            "deploying" => Ok(WorkerStatus::Deploying),
            "online" => Ok(WorkerStatus::Online),
            "offline" => Ok(WorkerStatus::Offline),
            "updating" => Ok(WorkerStatus::Updating),
            "outdated" => Ok(WorkerStatus::Outdated),
            other => Err(format!("unknown worker status: {other}")),
        }
    }
}

/// Outcome of feeding one heartbeat into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatTransition {
    /// Status the row should move to, if it changed.
    pub next_status: Option<WorkerStatus>,
    /// Agent version differs from the server image tag.
    pub need_update: bool,
    /// A remote update should be dispatched (remote workers only, guarded
    /// by the distributed update lock at the call site).
    pub dispatch_update: bool,
}

/// Advance a worker's status for an incoming heartbeat.
///
/// An empty or `"unknown"` agent version skips the version check entirely;
/// the heartbeat still brings a freshly deployed node online.
pub fn advance_on_heartbeat(
    current: WorkerStatus,
    agent_version: &str,
    server_version: &str,
    is_local: bool,
) -> HeartbeatTransition {
    let version_known = !agent_version.is_empty() && agent_version != "unknown";
    let need_update = version_known && agent_version != server_version;

    // First heartbeat after deployment brings the node online regardless
    // of version; drift is handled on the next beat.
    if !current.is_deployed() && !matches!(current, WorkerStatus::Updating | WorkerStatus::Outdated)
    {
        return HeartbeatTransition {
            next_status: Some(WorkerStatus::Online),
            need_update,
            dispatch_update: false,
        };
    }

    if !need_update {
        let next_status = (current != WorkerStatus::Online).then_some(WorkerStatus::Online);
        return HeartbeatTransition {
            next_status,
            need_update: false,
            dispatch_update: false,
        };
    }

    // Version drift: remote nodes can be updated over SSH; local nodes
    // share the server host and are only flagged.
    if is_local {
        HeartbeatTransition {
            next_status: (current != WorkerStatus::Outdated).then_some(WorkerStatus::Outdated),
            need_update: true,
            dispatch_update: false,
        }
    } else {
        HeartbeatTransition {
            next_status: (current != WorkerStatus::Updating).then_some(WorkerStatus::Updating),
            need_update: true,
            dispatch_update: current != WorkerStatus::Updating,
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
