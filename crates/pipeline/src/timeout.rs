// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tool timeout resolution.
//!
//! `"timeout": "auto"` scales with the input: line count times a
//! tool-specific per-line budget, floored at `min_timeout`. Anything
//! else must coerce to a positive integer; junk is a hard error rather
//! than a silent default.

use crate::{PipelineError, ToolConfig};
use std::path::Path;
use std::time::Duration;

/// Fallback when the config carries no timeout at all.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Floor for auto-computed timeouts.
pub const DEFAULT_MIN_TIMEOUT: u64 = 600;

/// Per-input-line budget in seconds.
pub fn per_line_seconds(tool: &str) -> u64 {
    match tool {
        "dalfox_xss" => 100,
        "nuclei" => 30,
        _ => 10,
    }
}

pub fn resolve_timeout(
    tool: &str,
    config: &ToolConfig,
    input_file: &Path,
) -> Result<Duration, PipelineError> {
    let Some(raw) = config.get("timeout") else {
        return Ok(DEFAULT_TIMEOUT);
    };

    match raw {
        serde_json::Value::String(s) if s == "auto" => {
            let lines = crate::workspace::count_lines(input_file).unwrap_or(0);
            let min_timeout = config
                .get("min_timeout")
                .and_then(|v| v.as_u64())
                .unwrap_or(DEFAULT_MIN_TIMEOUT);
            let computed = lines.saturating_mul(per_line_seconds(tool));
            Ok(Duration::from_secs(computed.max(min_timeout)))
        }
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(PipelineError::Config(format!(
                "invalid timeout for {tool}: {n}"
            ))),
        },
        serde_json::Value::String(s) => s
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| PipelineError::Config(format!("invalid timeout for {tool}: {s:?}"))),
        other => Err(PipelineError::Config(format!(
            "invalid timeout for {tool}: {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
