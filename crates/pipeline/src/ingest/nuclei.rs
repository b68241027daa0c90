// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! nuclei `-jsonl` stream → vulnerability records.

use serde_json::Value;
use xr_core::{TargetId, VulnSeverity, VulnerabilityRecord};

/// Parse one nuclei finding line. Non-JSON preamble returns `None`.
pub fn parse_line(target_id: TargetId, line: &str) -> Option<VulnerabilityRecord> {
    let trimmed = line.trim();
    if !trimmed.starts_with('{') {
        return None;
    }
    let value: Value = serde_json::from_str(trimmed).ok()?;
    let obj = value.as_object()?;

    let template_id = obj.get("template-id").and_then(Value::as_str)?;
    let info = obj.get("info").and_then(Value::as_object);

    let url = obj
        .get("matched-at")
        .or_else(|| obj.get("host"))
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())?;

    let severity = info
        .and_then(|i| i.get("severity"))
        .and_then(Value::as_str)
        .map(VulnSeverity::parse_lenient)
        .unwrap_or(VulnSeverity::Unknown);

    let description = info
        .and_then(|i| i.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let cvss = info
        .and_then(|i| i.get("classification"))
        .and_then(Value::as_object)
        .and_then(|c| c.get("cvss-score"))
        .and_then(Value::as_f64);

    let mut record = VulnerabilityRecord::new(target_id, url, template_id, severity, "nuclei");
    record.description = description;
    record.raw_output = value.clone();
    if let Some(score) = cvss {
        // Out-of-range scores in template metadata drop the score, not
        // the finding.
        record = match record.clone().with_cvss(score) {
            Ok(with_score) => with_score,
            Err(_) => record,
        };
    }
    Some(record)
}

#[cfg(test)]
#[path = "nuclei_tests.rs"]
mod tests;
