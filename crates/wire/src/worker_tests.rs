// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn heartbeat_request_tolerates_unknown_fields() {
    // Newer agents may send fields this server version does not know.
    let raw = r#"{
        "cpu_percent": 42.5,
        "memory_percent": 61.0,
        "version": "v1.0.19",
        "gpu_percent": 10.0
    }"#;
    let req: HeartbeatRequest = serde_json::from_str(raw).unwrap();
    assert!((req.cpu_percent - 42.5).abs() < f64::EPSILON);
    assert_eq!(req.version, "v1.0.19");
}

#[test]
fn heartbeat_request_defaults_missing_fields() {
    let req: HeartbeatRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(req.cpu_percent, 0.0);
    assert_eq!(req.version, "");
}

#[test]
fn register_round_trip() {
    let req = RegisterRequest {
        name: "Local-Scan-Worker".into(),
        is_local: true,
    };
    let json = serde_json::to_string(&req).unwrap();
    let back: RegisterRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, req.name);
    assert!(back.is_local);
}

#[test]
fn worker_summary_omits_absent_telemetry() {
    let summary = WorkerSummary {
        worker_id: xr_core::WorkerId::new(3),
        name: "edge-1".into(),
        ip_address: "203.0.113.9".into(),
        is_local: false,
        status: "online".into(),
        cpu_percent: None,
        memory_percent: None,
    };
    let json = serde_json::to_string(&summary).unwrap();
    assert!(!json.contains("cpu_percent"));
}
