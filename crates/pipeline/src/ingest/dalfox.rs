// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! dalfox `--format json` stream → xss vulnerability records.

use serde_json::Value;
use xr_core::{TargetId, VulnSeverity, VulnerabilityRecord};

/// Parse one dalfox finding line. Non-JSON preamble returns `None`.
pub fn parse_line(target_id: TargetId, line: &str) -> Option<VulnerabilityRecord> {
    let trimmed = line.trim().trim_end_matches(',');
    if !trimmed.starts_with('{') {
        return None;
    }
    let value: Value = serde_json::from_str(trimmed).ok()?;
    let obj = value.as_object()?;

    // "V" = verified finding; "W"/"G" are weak or grep-only signals.
    let finding_type = obj.get("type").and_then(Value::as_str).unwrap_or("");
    if finding_type.is_empty() {
        return None;
    }

    let url = obj.get("data").and_then(Value::as_str)?;
    if url.is_empty() {
        return None;
    }

    let severity = obj
        .get("severity")
        .and_then(Value::as_str)
        .map(VulnSeverity::parse_lenient)
        .unwrap_or(VulnSeverity::Unknown);

    let description = obj
        .get("message_str")
        .or_else(|| obj.get("evidence"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let mut record = VulnerabilityRecord::new(target_id, url, "xss", severity, "dalfox");
    record.description = description;
    record.raw_output = value.clone();
    Some(record)
}

#[cfg(test)]
#[path = "dalfox_tests.rs"]
mod tests;
