// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn config(value: serde_json::Value) -> ToolConfig {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("config fixture must be an object"),
    }
}

#[test]
fn subfinder_substitutes_domain_and_output() {
    let params = CommandParams {
        domain: Some("example.com".into()),
        output_file: Some("/tmp/subs.txt".into()),
        ..CommandParams::default()
    };
    let cmd = build_scan_command(
        ScanStage::SubdomainDiscovery,
        "subfinder",
        &params,
        &config(json!({})),
    )
    .unwrap();
    assert_eq!(cmd, "subfinder -d example.com -all -silent -o /tmp/subs.txt");
}

#[test]
fn optional_fragments_append_in_table_order() {
    let params = CommandParams {
        input_file: Some("/tmp/hosts.txt".into()),
        ..CommandParams::default()
    };
    let cmd = build_scan_command(
        ScanStage::PortScan,
        "naabu",
        &params,
        &config(json!({"rate": 500, "top_ports": "100", "unknown_key": "x"})),
    )
    .unwrap();
    assert_eq!(
        cmd,
        "naabu -list /tmp/hosts.txt -silent -json -top-ports 100 -rate 500"
    );
}

#[test]
fn empty_and_false_values_disable_fragments() {
    let params = CommandParams {
        input_file: Some("/tmp/urls.txt".into()),
        template_args: Some("-t /opt/templates".into()),
        ..CommandParams::default()
    };
    let cmd = build_scan_command(
        ScanStage::VulnScan,
        "nuclei",
        &params,
        &config(json!({"severity": "", "rate_limit": null})),
    )
    .unwrap();
    assert_eq!(
        cmd,
        "nuclei -l /tmp/urls.txt -silent -jsonl -t /opt/templates"
    );
}

#[test]
fn unknown_tool_is_a_config_error() {
    let err = build_scan_command(
        ScanStage::PortScan,
        "masscan",
        &CommandParams::default(),
        &config(json!({})),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)), "got: {err}");
}

#[test]
fn unresolved_placeholder_is_a_config_error() {
    // ffuf needs site_url + wordlist + output_file; give it nothing.
    let err = build_scan_command(
        ScanStage::DirectoryScan,
        "ffuf",
        &CommandParams::default(),
        &config(json!({})),
    )
    .unwrap_err();
    match err {
        PipelineError::Config(msg) => assert!(msg.contains("{site_url}"), "msg: {msg}"),
        other => panic!("unexpected: {other}"),
    }
}

#[test]
fn ffuf_builds_per_site_command() {
    let params = CommandParams {
        site_url: Some("https://a.example.com".into()),
        wordlist: Some("/opt/wordlists/common.txt".into()),
        output_file: Some("/tmp/dirs.json".into()),
        ..CommandParams::default()
    };
    let cmd = build_scan_command(
        ScanStage::DirectoryScan,
        "ffuf",
        &params,
        &config(json!({"match_codes": "200,301,302"})),
    )
    .unwrap();
    assert_eq!(
        cmd,
        "ffuf -u https://a.example.com/FUZZ -w /opt/wordlists/common.txt -of json \
         -o /tmp/dirs.json -mc 200,301,302"
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    );
}
