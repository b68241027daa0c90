// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subdomain tool output: one hostname per line (subfinder,
//! assetfinder).

use xr_core::{SubdomainRecord, TargetId};

/// Parse one plaintext hostname line.
pub fn parse_line(target_id: TargetId, line: &str) -> Option<SubdomainRecord> {
    let name = line.trim().trim_end_matches('.').to_ascii_lowercase();
    if name.is_empty() || !name.contains('.') || name.contains(char::is_whitespace) {
        return None;
    }
    // Some tools echo urls; keep the bare host.
    let name = name
        .strip_prefix("https://")
        .or_else(|| name.strip_prefix("http://"))
        .unwrap_or(&name)
        .split('/')
        .next()?
        .to_string();
    SubdomainRecord::new(target_id, name).ok()
}

#[cfg(test)]
#[path = "subfinder_tests.rs"]
mod tests;
