// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_a_cve_finding_with_cvss() {
    let line = r#"{"template-id":"CVE-2021-44228","template-path":"/opt/nuclei/official/http/cves/CVE-2021-44228.yaml","info":{"name":"Apache Log4j RCE","severity":"critical","classification":{"cvss-score":10.0,"cve-id":["CVE-2021-44228"]}},"type":"http","host":"https://a.example.com","matched-at":"https://a.example.com/api/login","timestamp":"2026-08-01T11:00:00Z"}"#;
    let rec = parse_line(TargetId::new(4), line).unwrap();
    assert_eq!(rec.url, "https://a.example.com/api/login");
    assert_eq!(rec.vuln_type, "CVE-2021-44228");
    assert_eq!(rec.severity, VulnSeverity::Critical);
    assert_eq!(rec.cvss_score, Some(10.0));
    assert_eq!(rec.source, "nuclei");
    assert_eq!(rec.description, "Apache Log4j RCE");
}

#[test]
fn falls_back_to_host_when_matched_at_is_absent() {
    let line = r#"{"template-id":"tech-detect","info":{"severity":"info"},"host":"https://b.example.com"}"#;
    let rec = parse_line(TargetId::new(4), line).unwrap();
    assert_eq!(rec.url, "https://b.example.com");
    assert_eq!(rec.severity, VulnSeverity::Info);
    assert_eq!(rec.cvss_score, None);
}

#[test]
fn out_of_range_cvss_drops_the_score_only() {
    let line = r#"{"template-id":"x","info":{"severity":"low","classification":{"cvss-score":11.0}},"matched-at":"https://b.example.com/x"}"#;
    let rec = parse_line(TargetId::new(4), line).unwrap();
    assert_eq!(rec.cvss_score, None);
    assert_eq!(rec.severity, VulnSeverity::Low);
}

#[test]
fn skips_stats_and_banner_lines() {
    assert!(parse_line(TargetId::new(4), "[INF] Using Nuclei Engine 3.2").is_none());
    assert!(parse_line(TargetId::new(4), r#"{"info":{"severity":"low"}}"#).is_none());
}
