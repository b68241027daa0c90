// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical asset records produced by ingestion and persisted by the
//! asset store.
//!
//! These are transport shapes, not rows: they carry no `id` and no
//! `discovered_at` (the store assigns both; `discovered_at` is immutable
//! after first insert).

use crate::{DomainError, TargetId, VulnSeverity, WebsiteId};
use serde::{Deserialize, Serialize};

/// Pure presence record: a subdomain seen under a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainRecord {
    pub target_id: TargetId,
    pub name: String,
}

impl SubdomainRecord {
    pub fn new(target_id: TargetId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("subdomain.name"));
        }
        Ok(Self { target_id, name })
    }
}

/// HTTP probe metadata shared by websites and endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpMeta {
    pub host: String,
    pub location: String,
    pub title: String,
    pub webserver: String,
    pub body_preview: String,
    pub content_type: String,
    pub tech: Vec<String>,
    pub status_code: Option<i32>,
    pub content_length: Option<i64>,
    pub vhost: Option<bool>,
}

/// A probed website root, unique per (target, url).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteRecord {
    pub target_id: TargetId,
    pub url: String,
    #[serde(flatten)]
    pub meta: HttpMeta,
}

impl WebsiteRecord {
    pub fn new(target_id: TargetId, url: impl Into<String>) -> Result<Self, DomainError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DomainError::EmptyField("website.url"));
        }
        Ok(Self {
            target_id,
            url,
            meta: HttpMeta::default(),
        })
    }
}

/// A crawled endpoint, unique per (target, url). Same metadata shape as a
/// website plus the matched GF pattern labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub target_id: TargetId,
    pub url: String,
    #[serde(flatten)]
    pub meta: HttpMeta,
    pub matched_gf_patterns: Vec<String>,
}

impl EndpointRecord {
    pub fn new(target_id: TargetId, url: impl Into<String>) -> Result<Self, DomainError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DomainError::EmptyField("endpoint.url"));
        }
        Ok(Self {
            target_id,
            url,
            meta: HttpMeta::default(),
            matched_gf_patterns: Vec::new(),
        })
    }
}

/// A fuzzed directory hit under a website, unique per (website, url).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub website_id: WebsiteId,
    pub target_id: TargetId,
    pub url: String,
    pub status: Option<i32>,
    pub content_length: Option<i64>,
    pub words: Option<i32>,
    pub lines: Option<i32>,
    pub content_type: String,
    /// Request duration in nanoseconds.
    pub duration: Option<i64>,
}

/// A (host, ip, port) triple under a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPortRecord {
    pub target_id: TargetId,
    pub host: String,
    pub ip: String,
    pub port: u16,
}

impl HostPortRecord {
    /// Port 0 is rejected; u16 bounds the upper end.
    pub fn new(
        target_id: TargetId,
        host: impl Into<String>,
        ip: impl Into<String>,
        port: u32,
    ) -> Result<Self, DomainError> {
        if port == 0 || port > u16::MAX as u32 {
            return Err(DomainError::PortOutOfRange(port));
        }
        let host = host.into();
        if host.trim().is_empty() {
            return Err(DomainError::EmptyField("host_port.host"));
        }
        Ok(Self {
            target_id,
            host,
            ip: ip.into(),
            port: port as u16,
        })
    }
}

/// A vulnerability finding. Appended, never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    pub target_id: TargetId,
    pub url: String,
    pub vuln_type: String,
    pub severity: VulnSeverity,
    /// Tool that produced the finding (dalfox, nuclei, crlfuzz).
    pub source: String,
    pub cvss_score: Option<f64>,
    pub description: String,
    /// Raw tool output for the finding, kept opaque.
    pub raw_output: serde_json::Value,
}

impl VulnerabilityRecord {
    pub fn new(
        target_id: TargetId,
        url: impl Into<String>,
        vuln_type: impl Into<String>,
        severity: VulnSeverity,
        source: impl Into<String>,
    ) -> Self {
        Self {
            target_id,
            url: url.into(),
            vuln_type: vuln_type.into(),
            severity,
            source: source.into(),
            cvss_score: None,
            description: String::new(),
            raw_output: serde_json::Value::Null,
        }
    }

    pub fn with_cvss(mut self, score: f64) -> Result<Self, DomainError> {
        if !(0.0..=10.0).contains(&score) {
            return Err(DomainError::CvssOutOfRange(score));
        }
        self.cvss_score = Some(score);
        Ok(self)
    }
}

#[cfg(test)]
#[path = "assets_tests.rs"]
mod tests;
