// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    subdomain = { ScanStage::SubdomainDiscovery, "subdomain_discovery" },
    ports = { ScanStage::PortScan, "port_scan" },
    sites = { ScanStage::SiteScan, "site_scan" },
    urls = { ScanStage::UrlFetch, "url_fetch" },
    dirs = { ScanStage::DirectoryScan, "directory_scan" },
    vulns = { ScanStage::VulnScan, "vuln_scan" },
)]
fn round_trips_through_str(stage: ScanStage, name: &str) {
    assert_eq!(stage.as_str(), name);
    assert_eq!(name.parse::<ScanStage>().unwrap(), stage);
}

#[test]
fn rejects_unknown_stage() {
    assert!("dns_scan".parse::<ScanStage>().is_err());
}

#[test]
fn all_lists_stages_in_pipeline_order() {
    assert_eq!(ScanStage::ALL.len(), 6);
    assert_eq!(ScanStage::ALL[0], ScanStage::SubdomainDiscovery);
    assert_eq!(ScanStage::ALL[5], ScanStage::VulnScan);
}

#[test]
fn serde_uses_snake_case() {
    let json = serde_json::to_string(&ScanStage::UrlFetch).unwrap();
    assert_eq!(json, "\"url_fetch\"");
}
