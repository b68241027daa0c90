// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ordered_least_to_most_severe() {
    assert!(VulnSeverity::Unknown < VulnSeverity::Info);
    assert!(VulnSeverity::Info < VulnSeverity::Low);
    assert!(VulnSeverity::Low < VulnSeverity::Medium);
    assert!(VulnSeverity::Medium < VulnSeverity::High);
    assert!(VulnSeverity::High < VulnSeverity::Critical);
}

#[test]
fn lenient_parse_tolerates_tool_dialects() {
    assert_eq!(VulnSeverity::parse_lenient("Medium"), VulnSeverity::Medium);
    assert_eq!(VulnSeverity::parse_lenient(" CRITICAL "), VulnSeverity::Critical);
    assert_eq!(VulnSeverity::parse_lenient("informational"), VulnSeverity::Info);
    assert_eq!(VulnSeverity::parse_lenient("wat"), VulnSeverity::Unknown);
    assert_eq!(VulnSeverity::parse_lenient(""), VulnSeverity::Unknown);
}

#[test]
fn serde_round_trip() {
    let json = serde_json::to_string(&VulnSeverity::High).unwrap();
    assert_eq!(json, "\"high\"");
    let back: VulnSeverity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, VulnSeverity::High);
}
