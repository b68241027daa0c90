// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_results_array() {
    let contents = r#"{
        "commandline": "ffuf -u https://a.example.com/FUZZ -w common.txt",
        "time": "2026-08-01T12:00:00Z",
        "results": [
            {"input":{"FUZZ":"admin"},"position":1,"status":301,"length":162,"words":5,"lines":8,"content-type":"text/html","url":"https://a.example.com/admin","duration":152000000,"host":"a.example.com"},
            {"input":{"FUZZ":"backup"},"position":2,"status":200,"length":4096,"words":120,"lines":40,"content-type":"application/zip","url":"https://a.example.com/backup","duration":98000000,"host":"a.example.com"}
        ]
    }"#;
    let records = parse_output(TargetId::new(5), WebsiteId::new(9), contents);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, "https://a.example.com/admin");
    assert_eq!(records[0].status, Some(301));
    assert_eq!(records[0].duration, Some(152_000_000));
    assert_eq!(records[1].content_type, "application/zip");
    assert!(records.iter().all(|r| r.website_id == WebsiteId::new(9)));
}

#[test]
fn tolerates_empty_and_garbage_output() {
    assert!(parse_output(TargetId::new(5), WebsiteId::new(9), "").is_empty());
    assert!(parse_output(TargetId::new(5), WebsiteId::new(9), "not json").is_empty());
    assert!(parse_output(TargetId::new(5), WebsiteId::new(9), r#"{"results":[]}"#).is_empty());
}
