// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! httpx JSON stream → website records.

use serde::Deserialize;
use serde_json::Value;
use xr_core::{HttpMeta, TargetId, WebsiteRecord};

#[derive(Debug, Default, Deserialize)]
struct HttpxLine {
    #[serde(default)]
    url: String,
    #[serde(default)]
    final_url: String,
    #[serde(default)]
    input: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    webserver: String,
    #[serde(default)]
    content_type: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    body_preview: String,
    #[serde(default)]
    tech: Vec<String>,
    #[serde(default)]
    status_code: Option<i32>,
    #[serde(default)]
    content_length: Option<i64>,
    #[serde(default)]
    vhost: Option<bool>,
}

/// Hostname (no scheme, no port, no path) of a url.
pub(crate) fn host_of_url(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .split('@')
        .next_back()
        .unwrap_or("")
        .split(':')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Parse one httpx result line. Non-JSON preamble returns `None`.
pub fn parse_line(target_id: TargetId, line: &str) -> Option<WebsiteRecord> {
    let trimmed = line.trim();
    if !trimmed.starts_with('{') {
        return None;
    }
    // Tolerate schema drift: unknown fields are dropped, missing ones default.
    let value: Value = serde_json::from_str(trimmed).ok()?;
    let parsed: HttpxLine = serde_json::from_value(value).ok()?;

    let url = if !parsed.final_url.is_empty() {
        parsed.final_url
    } else {
        parsed.url
    };
    if url.is_empty() {
        return None;
    }

    let host = if parsed.input.is_empty() {
        host_of_url(&url)
    } else {
        host_of_url(&parsed.input)
    };

    let mut record = WebsiteRecord::new(target_id, url).ok()?;
    record.meta = HttpMeta {
        host,
        location: parsed.location,
        title: parsed.title,
        webserver: parsed.webserver,
        body_preview: parsed.body_preview.chars().take(1000).collect(),
        content_type: parsed.content_type,
        tech: parsed.tech,
        status_code: parsed.status_code,
        content_length: parsed.content_length,
        vhost: parsed.vhost,
    };
    Some(record)
}

#[cfg(test)]
#[path = "httpx_tests.rs"]
mod tests;
