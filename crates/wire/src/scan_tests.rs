// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn submit_response_skips_empty_fields() {
    let resp = ScanSubmitResponse {
        success: false,
        message: "no worker available".into(),
        scan_id: None,
        container_id: None,
        worker_id: None,
    };
    let json = serde_json::to_string(&resp).unwrap();
    assert!(!json.contains("container_id"));
    assert!(!json.contains("worker_id"));
}

#[test]
fn submit_request_round_trip() {
    let req = ScanSubmitRequest {
        target_id: xr_core::TargetId::new(12),
        engine_name: "full".into(),
        scheduled_scan_name: Some("nightly".into()),
    };
    let json = serde_json::to_string(&req).unwrap();
    let back: ScanSubmitRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.target_id, req.target_id);
    assert_eq!(back.scheduled_scan_name.as_deref(), Some("nightly"));
}
