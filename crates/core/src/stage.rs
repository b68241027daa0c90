// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan stages and their fixed execution order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One named phase of a scan.
///
/// The pipeline executes stages in three groups: the first three
/// sequentially, then `UrlFetch`/`DirectoryScan` in parallel, then
/// `VulnScan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    SubdomainDiscovery,
    PortScan,
    SiteScan,
    UrlFetch,
    DirectoryScan,
    VulnScan,
}

impl ScanStage {
    /// All stages in pipeline order.
    pub const ALL: [ScanStage; 6] = [
        ScanStage::SubdomainDiscovery,
        ScanStage::PortScan,
        ScanStage::SiteScan,
        ScanStage::UrlFetch,
        ScanStage::DirectoryScan,
        ScanStage::VulnScan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStage::SubdomainDiscovery => "subdomain_discovery",
            ScanStage::PortScan => "port_scan",
            ScanStage::SiteScan => "site_scan",
            ScanStage::UrlFetch => "url_fetch",
            ScanStage::DirectoryScan => "directory_scan",
            ScanStage::VulnScan => "vuln_scan",
        }
    }

    /// Pipeline progress percentage reported when this stage completes.
    pub fn progress_after(&self) -> u8 {
        match self {
            ScanStage::SubdomainDiscovery => 15,
            ScanStage::PortScan => 30,
            ScanStage::SiteScan => 45,
            ScanStage::UrlFetch => 60,
            ScanStage::DirectoryScan => 75,
            ScanStage::VulnScan => 95,
        }
    }
}

crate::simple_display! {
    ScanStage {
        SubdomainDiscovery => "subdomain_discovery",
        PortScan => "port_scan",
        SiteScan => "site_scan",
        UrlFetch => "url_fetch",
        DirectoryScan => "directory_scan",
        VulnScan => "vuln_scan",
    }
}

impl FromStr for ScanStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subdomain_discovery" => Ok(ScanStage::SubdomainDiscovery),
            "port_scan" => Ok(ScanStage::PortScan),
            "site_scan" => Ok(ScanStage::SiteScan),
            "url_fetch" => Ok(ScanStage::UrlFetch),
            "directory_scan" => Ok(ScanStage::DirectoryScan),
            "vuln_scan" => Ok(ScanStage::VulnScan),
            other => Err(format!("unknown scan stage: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
