// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use std::io::Write;

fn config(value: serde_json::Value) -> ToolConfig {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("config fixture must be an object"),
    }
}

fn input_with_lines(n: usize) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    let mut f = std::fs::File::create(&path).unwrap();
    for i in 0..n {
        writeln!(f, "https://a.example.com/{i}").unwrap();
    }
    (dir, path)
}

#[test]
fn missing_timeout_uses_default() {
    let (_dir, path) = input_with_lines(5);
    let t = resolve_timeout("httpx", &config(json!({})), &path).unwrap();
    assert_eq!(t, DEFAULT_TIMEOUT);
}

#[test]
fn integer_timeout_is_taken_verbatim() {
    let (_dir, path) = input_with_lines(5);
    let t = resolve_timeout("httpx", &config(json!({"timeout": 120})), &path).unwrap();
    assert_eq!(t, Duration::from_secs(120));
}

#[test]
fn numeric_string_coerces() {
    let (_dir, path) = input_with_lines(5);
    let t = resolve_timeout("httpx", &config(json!({"timeout": "90"})), &path).unwrap();
    assert_eq!(t, Duration::from_secs(90));
}

#[test]
fn auto_scales_with_line_count_per_tool() {
    let (_dir, path) = input_with_lines(20);
    // dalfox: 20 lines * 100 s = 2000 s, above the 600 s floor.
    let t = resolve_timeout("dalfox_xss", &config(json!({"timeout": "auto"})), &path).unwrap();
    assert_eq!(t, Duration::from_secs(2000));
    // nuclei: 20 * 30 = 600, exactly at the floor.
    let t = resolve_timeout("nuclei", &config(json!({"timeout": "auto"})), &path).unwrap();
    assert_eq!(t, Duration::from_secs(600));
}

#[test]
fn auto_respects_min_timeout_floor() {
    let (_dir, path) = input_with_lines(2);
    let t = resolve_timeout(
        "nuclei",
        &config(json!({"timeout": "auto", "min_timeout": 900})),
        &path,
    )
    .unwrap();
    assert_eq!(t, Duration::from_secs(900));
}

#[test]
fn garbage_timeout_is_a_hard_error() {
    let (_dir, path) = input_with_lines(1);
    for bad in [json!({"timeout": "soon"}), json!({"timeout": 0}), json!({"timeout": [1]})] {
        let err = resolve_timeout("httpx", &config(bad), &path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)), "got: {err}");
    }
}
