// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_a_verified_finding() {
    let line = r#"{"type":"V","inject_type":"inHTML","poc_type":"plain","method":"GET","data":"https://a.example.com/search?q=%3Cscript%3E","param":"q","payload":"<script>alert(1)</script>","evidence":"48 line: <script>alert(1)</script>","cwe":"CWE-79","severity":"Medium","message_id":1,"message_str":"Triggered XSS Payload"}"#;
    let rec = parse_line(TargetId::new(3), line).unwrap();
    assert_eq!(rec.url, "https://a.example.com/search?q=%3Cscript%3E");
    assert_eq!(rec.vuln_type, "xss");
    assert_eq!(rec.severity, VulnSeverity::Medium);
    assert_eq!(rec.source, "dalfox");
    assert_eq!(rec.description, "Triggered XSS Payload");
    assert_eq!(rec.raw_output["cwe"], "CWE-79");
}

#[test]
fn skips_banners_and_incomplete_objects() {
    assert!(parse_line(TargetId::new(3), "[*] Using single target mode").is_none());
    assert!(parse_line(TargetId::new(3), r#"{"type":"V"}"#).is_none());
    assert!(parse_line(TargetId::new(3), r#"{"data":"https://a/x"}"#).is_none());
}

#[test]
fn unknown_severity_maps_to_unknown() {
    let line = r#"{"type":"W","data":"https://a.example.com/x","severity":"odd"}"#;
    let rec = parse_line(TargetId::new(3), line).unwrap();
    assert_eq!(rec.severity, VulnSeverity::Unknown);
}
