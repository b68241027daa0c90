// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

const SERVER: &str = "v1.0.19";

#[parameterized(
    pending = { WorkerStatus::Pending },
    deploying = { WorkerStatus::Deploying },
)]
fn first_heartbeat_brings_node_online(current: WorkerStatus) {
    let t = advance_on_heartbeat(current, SERVER, SERVER, false);
    assert_eq!(t.next_status, Some(WorkerStatus::Online));
    assert!(!t.need_update);
    assert!(!t.dispatch_update);
}

#[test]
fn matching_version_keeps_node_online_without_write() {
    let t = advance_on_heartbeat(WorkerStatus::Online, SERVER, SERVER, false);
    assert_eq!(t.next_status, None);
    assert!(!t.need_update);
}

#[parameterized(
    offline = { WorkerStatus::Offline },
    updating = { WorkerStatus::Updating },
    outdated = { WorkerStatus::Outdated },
)]
fn matching_version_recovers_to_online(current: WorkerStatus) {
    let t = advance_on_heartbeat(current, SERVER, SERVER, true);
    assert_eq!(t.next_status, Some(WorkerStatus::Online));
    assert!(!t.need_update);
    assert!(!t.dispatch_update);
}

#[test]
fn remote_version_drift_dispatches_update_once() {
    let t = advance_on_heartbeat(WorkerStatus::Online, "v1.0.9", SERVER, false);
    assert_eq!(t.next_status, Some(WorkerStatus::Updating));
    assert!(t.need_update);
    assert!(t.dispatch_update);

    // Subsequent heartbeats while updating must not re-dispatch.
    let t = advance_on_heartbeat(WorkerStatus::Updating, "v1.0.9", SERVER, false);
    assert_eq!(t.next_status, None);
    assert!(t.need_update);
    assert!(!t.dispatch_update);
}

#[test]
fn local_version_drift_marks_outdated() {
    let t = advance_on_heartbeat(WorkerStatus::Online, "v1.0.9", SERVER, true);
    assert_eq!(t.next_status, Some(WorkerStatus::Outdated));
    assert!(t.need_update);
    assert!(!t.dispatch_update);
}

#[parameterized(
    empty = { "" },
    unknown = { "unknown" },
)]
fn unreported_version_skips_version_check(version: &str) {
    let t = advance_on_heartbeat(WorkerStatus::Online, version, SERVER, false);
    assert_eq!(t.next_status, None);
    assert!(!t.need_update);
    assert!(!t.dispatch_update);
}

#[test]
fn deployed_statuses() {
    assert!(WorkerStatus::Online.is_deployed());
    assert!(WorkerStatus::Offline.is_deployed());
    assert!(!WorkerStatus::Pending.is_deployed());
    assert!(!WorkerStatus::Updating.is_deployed());
}
