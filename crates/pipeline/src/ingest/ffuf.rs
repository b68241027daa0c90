// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ffuf `-of json` output file → directory records.

use serde::Deserialize;
use xr_core::{DirectoryRecord, TargetId, WebsiteId};

#[derive(Debug, Deserialize)]
struct FfufOutput {
    #[serde(default)]
    results: Vec<FfufResult>,
}

#[derive(Debug, Deserialize)]
struct FfufResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    status: Option<i32>,
    #[serde(default)]
    length: Option<i64>,
    #[serde(default)]
    words: Option<i32>,
    #[serde(default)]
    lines: Option<i32>,
    #[serde(rename = "content-type", default)]
    content_type: String,
    /// Request duration in nanoseconds.
    #[serde(default)]
    duration: Option<i64>,
}

/// Parse a whole ffuf JSON output file for one website.
pub fn parse_output(
    target_id: TargetId,
    website_id: WebsiteId,
    contents: &str,
) -> Vec<DirectoryRecord> {
    let parsed: FfufOutput = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "unparseable ffuf output");
            return Vec::new();
        }
    };

    parsed
        .results
        .into_iter()
        .filter(|r| !r.url.is_empty())
        .map(|r| DirectoryRecord {
            website_id,
            target_id,
            url: r.url,
            status: r.status,
            content_length: r.length,
            words: r.words,
            lines: r.lines,
            content_type: r.content_type,
            duration: r.duration,
        })
        .collect()
}

#[cfg(test)]
#[path = "ffuf_tests.rs"]
mod tests;
