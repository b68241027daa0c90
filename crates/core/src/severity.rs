// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vulnerability severity scale.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity of a finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VulnSeverity {
    Unknown,
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl VulnSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnSeverity::Unknown => "unknown",
            VulnSeverity::Info => "info",
            VulnSeverity::Low => "low",
            VulnSeverity::Medium => "medium",
            VulnSeverity::High => "high",
            VulnSeverity::Critical => "critical",
        }
    }

    /// Lenient parse for tool output dialects. Anything unrecognized maps
    /// to `Unknown` rather than failing the line.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(VulnSeverity::Unknown)
    }
}

crate::simple_display! {
    VulnSeverity {
        Unknown => "unknown",
        Info => "info",
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

impl FromStr for VulnSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(VulnSeverity::Unknown),
            "info" | "informational" => Ok(VulnSeverity::Info),
            "low" => Ok(VulnSeverity::Low),
            "medium" | "moderate" => Ok(VulnSeverity::Medium),
            "high" => Ok(VulnSeverity::High),
            "critical" => Ok(VulnSeverity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "severity_tests.rs"]
mod tests;
