// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::DomainError;
use yare::parameterized;

#[parameterized(
    min = { 1 },
    ssh = { 22 },
    max = { 65535 },
)]
fn accepts_valid_ports(port: u32) {
    let rec = HostPortRecord::new(TargetId::new(1), "a.example.com", "10.0.0.1", port).unwrap();
    assert_eq!(rec.port as u32, port);
}

#[parameterized(
    zero = { 0 },
    too_big = { 65536 },
    way_too_big = { 1_000_000 },
)]
fn rejects_out_of_range_ports(port: u32) {
    let err = HostPortRecord::new(TargetId::new(1), "a.example.com", "10.0.0.1", port).unwrap_err();
    assert_eq!(err, DomainError::PortOutOfRange(port));
}

#[test]
fn rejects_empty_subdomain_name() {
    assert!(SubdomainRecord::new(TargetId::new(1), "  ").is_err());
    assert!(SubdomainRecord::new(TargetId::new(1), "www.example.com").is_ok());
}

#[test]
fn cvss_bounds_enforced() {
    let base = VulnerabilityRecord::new(
        TargetId::new(1),
        "https://a.example.com/x",
        "xss",
        VulnSeverity::High,
        "dalfox",
    );
    assert!(base.clone().with_cvss(0.0).is_ok());
    assert!(base.clone().with_cvss(10.0).is_ok());
    assert!(base.clone().with_cvss(-0.1).is_err());
    assert!(base.with_cvss(10.1).is_err());
}

#[test]
fn http_meta_defaults_are_empty() {
    let site = WebsiteRecord::new(TargetId::new(3), "https://example.com/").unwrap();
    assert!(site.meta.tech.is_empty());
    assert_eq!(site.meta.status_code, None);
    assert_eq!(site.meta.title, "");
}
