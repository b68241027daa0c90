// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! naabu JSON stream: one `{host, ip, port}` object per line.

use serde_json::Value;
use xr_core::{HostPortRecord, TargetId};

/// Parse one naabu result line. Non-JSON preamble returns `None`.
pub fn parse_line(target_id: TargetId, line: &str) -> Option<HostPortRecord> {
    let value: Value = serde_json::from_str(line.trim()).ok()?;
    let obj = value.as_object()?;

    let ip = obj.get("ip").and_then(Value::as_str).unwrap_or("").to_string();
    let host = obj
        .get("host")
        .and_then(Value::as_str)
        .filter(|h| !h.is_empty())
        .unwrap_or(ip.as_str())
        .to_string();

    // Older naabu versions nest the port as {"Port": n}.
    let port = match obj.get("port")? {
        Value::Number(n) => n.as_u64()?,
        Value::Object(nested) => nested.get("Port").and_then(Value::as_u64)?,
        _ => return None,
    };

    HostPortRecord::new(target_id, host, ip, u32::try_from(port).ok()?).ok()
}

#[cfg(test)]
#[path = "naabu_tests.rs"]
mod tests;
