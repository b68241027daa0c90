// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::clean_line;
use yare::parameterized;

#[parameterized(
    plain = { "example.com", Some("example.com") },
    padded = { "  example.com \t", Some("example.com") },
    empty = { "", None },
    whitespace_only = { "   \t  ", None },
)]
fn trims_and_drops_empties(input: &str, expected: Option<&str>) {
    assert_eq!(clean_line(input, None).as_deref(), expected);
}

#[test]
fn strips_ansi_color_codes() {
    let colored = "\x1b[32mfound\x1b[0m https://a.example.com/";
    assert_eq!(
        clean_line(colored, None).as_deref(),
        Some("found https://a.example.com/")
    );
}

#[test]
fn strips_osc_title_sequences() {
    let osc = "\x1b]0;nuclei\x07result-line";
    assert_eq!(clean_line(osc, None).as_deref(), Some("result-line"));
}

#[test]
fn resolves_literal_escape_strings() {
    // A literal backslash-x0d-x0a in the byte stream, not a real newline.
    let line = "host\\x0d\\x0a";
    assert_eq!(clean_line(line, None).as_deref(), Some("host"));
}

#[test]
fn deletes_control_characters() {
    let line = "a.example.com\0\u{8}\u{c}\u{b}\r";
    assert_eq!(clean_line(line, None).as_deref(), Some("a.example.com"));
}

#[parameterized(
    with_suffix = { "a.example.com.", Some('.'), Some("a.example.com") },
    without_suffix = { "a.example.com", Some('.'), Some("a.example.com") },
    only_suffix = { ".", Some('.'), None },
    suffix_disabled = { "a.example.com.", None, Some("a.example.com.") },
)]
fn strips_trailing_suffix_char(input: &str, suffix: Option<char>, expected: Option<&str>) {
    assert_eq!(clean_line(input, suffix).as_deref(), expected);
}

#[test]
fn line_of_pure_ansi_noise_becomes_none() {
    assert_eq!(clean_line("\x1b[2K\x1b[1G", None), None);
}
