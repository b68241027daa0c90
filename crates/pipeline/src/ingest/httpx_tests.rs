// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn parses_a_full_probe_result() {
    let line = r#"{"timestamp":"2026-08-01T10:00:00Z","url":"https://a.example.com","final_url":"https://a.example.com/home","input":"a.example.com:443","title":"Welcome","webserver":"nginx/1.24","content_type":"text/html","tech":["Nginx","React"],"status_code":200,"content_length":5120,"vhost":false,"location":"","body_preview":"<!doctype html>"}"#;
    let rec = parse_line(TargetId::new(2), line).unwrap();
    assert_eq!(rec.url, "https://a.example.com/home");
    assert_eq!(rec.meta.host, "a.example.com");
    assert_eq!(rec.meta.title, "Welcome");
    assert_eq!(rec.meta.webserver, "nginx/1.24");
    assert_eq!(rec.meta.tech, vec!["Nginx", "React"]);
    assert_eq!(rec.meta.status_code, Some(200));
    assert_eq!(rec.meta.content_length, Some(5120));
    assert_eq!(rec.meta.vhost, Some(false));
}

#[test]
fn falls_back_to_url_when_final_url_is_absent() {
    let line = r#"{"url":"http://b.example.com:8080/x","status_code":301,"location":"https://b.example.com/"}"#;
    let rec = parse_line(TargetId::new(2), line).unwrap();
    assert_eq!(rec.url, "http://b.example.com:8080/x");
    assert_eq!(rec.meta.host, "b.example.com");
    assert_eq!(rec.meta.location, "https://b.example.com/");
}

#[test]
fn preamble_lines_are_skipped() {
    assert!(parse_line(TargetId::new(2), "httpx version 1.6.0").is_none());
    assert!(parse_line(TargetId::new(2), r#"{"no_url_here":true}"#).is_none());
}

#[parameterized(
    https = { "https://a.example.com/path?q=1", "a.example.com" },
    port = { "http://a.example.com:8443/", "a.example.com" },
    bare = { "a.example.com", "a.example.com" },
    userinfo = { "https://user@a.example.com/x", "a.example.com" },
)]
fn host_extraction(url: &str, expected: &str) {
    assert_eq!(host_of_url(url), expected);
}
