// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output line sanitization.
//!
//! Scan tools write colored, escape-ridden, occasionally binary-tainted
//! output. Every line handed to a parser goes through [`clean_line`]:
//! trim, drop empties, resolve literal escape strings, strip ANSI
//! CSI/OSC sequences, delete stray control characters, retrim, and
//! optionally strip one trailing suffix character.

use regex::Regex;
use std::sync::LazyLock;

/// ANSI escapes: OSC sequences (terminated by BEL or ST) and CSI /
/// single-character escapes.
#[allow(clippy::expect_used)]
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\][^\x07\x1B]*(?:\x07|\x1B\\)?|\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])")
        .expect("constant regex pattern is valid")
});

/// Literal escape strings some tools emit instead of the real bytes.
const LITERAL_ESCAPES: [(&str, &str); 7] = [
    ("\\x0d\\x0a", "\n"),
    ("\\x0a", "\n"),
    ("\\x0d", "\r"),
    ("\\r\\n", "\n"),
    ("\\n", "\n"),
    ("\\r", "\r"),
    ("\\t", "\t"),
];

/// Control characters deleted outright (NUL, CR, BS, FF, VT).
const CONTROL_CHARS: [char; 5] = ['\0', '\r', '\u{8}', '\u{c}', '\u{b}'];

/// Clean one raw output line. Returns `None` when nothing usable remains.
pub fn clean_line(raw: &str, suffix_char: Option<char>) -> Option<String> {
    let mut line = raw.trim().to_string();
    if line.is_empty() {
        return None;
    }

    for (literal, actual) in LITERAL_ESCAPES {
        if line.contains(literal) {
            line = line.replace(literal, actual);
        }
    }

    line = ANSI_ESCAPE.replace_all(&line, "").into_owned();
    line.retain(|c| !CONTROL_CHARS.contains(&c));

    let mut line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(suffix) = suffix_char {
        if let Some(stripped) = line.strip_suffix(suffix) {
            line = stripped.trim();
        }
    }

    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
