// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_flat_port_format() {
    let line = r#"{"host":"a.example.com","ip":"93.184.216.34","port":443,"protocol":"tcp","timestamp":"2026-08-01T10:00:00Z"}"#;
    let rec = parse_line(TargetId::new(1), line).unwrap();
    assert_eq!(rec.host, "a.example.com");
    assert_eq!(rec.ip, "93.184.216.34");
    assert_eq!(rec.port, 443);
}

#[test]
fn parses_nested_port_format() {
    let line = r#"{"host":"a.example.com","ip":"93.184.216.34","port":{"Port":8080,"Protocol":"tcp"}}"#;
    let rec = parse_line(TargetId::new(1), line).unwrap();
    assert_eq!(rec.port, 8080);
}

#[test]
fn host_falls_back_to_ip() {
    let line = r#"{"ip":"10.0.0.5","port":22}"#;
    let rec = parse_line(TargetId::new(1), line).unwrap();
    assert_eq!(rec.host, "10.0.0.5");
}

#[test]
fn preamble_and_invalid_ports_are_skipped() {
    assert!(parse_line(TargetId::new(1), "Current naabu version v2.3.0").is_none());
    assert!(parse_line(TargetId::new(1), r#"{"ip":"10.0.0.5","port":0}"#).is_none());
    assert!(parse_line(TargetId::new(1), r#"{"ip":"10.0.0.5","port":90000}"#).is_none());
}
