// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use xr_store::WorkerRow;

fn worker(is_local: bool) -> WorkerRow {
    WorkerRow {
        id: 1,
        name: "w1".into(),
        ip_address: if is_local { "127.0.0.1".into() } else { "203.0.113.5".into() },
        ssh_port: 22,
        username: "root".into(),
        password: String::new(),
        is_local,
        status: "online".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn cfg() -> DispatchConfig {
    let mut cfg = DispatchConfig::for_image("xingrin/worker:v1.0.19", "v1.0.19");
    cfg.public_host = "scan.example.com".into();
    cfg
}

fn quoted(value: &str) -> String {
    shlex::try_quote(value).unwrap().into_owned()
}

#[test]
fn local_worker_joins_internal_network() {
    let cmd = build_docker_command(
        &cfg(),
        &worker(true),
        ScriptModule::RunInitiateScan,
        &[("scan_id", "7".into())],
    );
    assert!(cmd.starts_with("docker run --rm -d --pull=missing --network xingrin-net "));
    assert!(cmd.contains(&format!("-e SERVER_URL={}", quoted("http://server:8000"))));
    assert!(cmd.contains("-e IS_LOCAL=true"));
    assert!(cmd.contains("xingrin-worker run_initiate_scan --scan_id=7"));
}

#[test]
fn remote_worker_uses_public_host_and_no_network() {
    let cmd = build_docker_command(
        &cfg(),
        &worker(false),
        ScriptModule::RunInitiateScan,
        &[("scan_id", "7".into())],
    );
    assert!(!cmd.contains("--network"));
    assert!(cmd.contains(&format!(
        "-e SERVER_URL={}",
        quoted("http://scan.example.com:8000")
    )));
    assert!(cmd.contains("-e IS_LOCAL=false"));
}

#[test]
fn mounts_results_and_logs_directories() {
    let cmd = build_docker_command(&cfg(), &worker(true), ScriptModule::RunCleanup, &[]);
    assert!(cmd.contains("-v /opt/xingrin/results:/app/results"));
    assert!(cmd.contains("-v /opt/xingrin/logs:/app/logs"));
}

#[test]
fn argument_values_are_shell_quoted() {
    let value = "a b; rm -rf /";
    let cmd = build_docker_command(
        &cfg(),
        &worker(true),
        ScriptModule::RunInitiateScan,
        &[("target_name", value.into())],
    );
    // Never the raw value on the command line…
    assert!(!cmd.contains("--target_name=a b"), "cmd: {cmd}");
    // …always the shell-quoted form, which splits back to the original.
    let token = format!("--target_name={}", quoted(value));
    assert!(cmd.contains(&token), "cmd: {cmd}");
    assert_eq!(
        shlex::split(&token).as_deref(),
        Some(&[format!("--target_name={value}")][..])
    );
}

#[test]
fn wraps_with_log_truncation_prefix() {
    let cmd = build_docker_command(&cfg(), &worker(true), ScriptModule::RunDeleteScans, &[]);
    assert!(cmd.contains("tail -n 10000 /app/logs/container_run_delete_scans.log"));
    assert!(cmd.contains(">> /app/logs/container_run_delete_scans.log 2>&1"));
    assert!(cmd.contains("sh -c \""));
    // Only the two declared env vars plus the runtime opt-outs.
    assert_eq!(cmd.matches("-e ").count(), 4);
}

#[test]
fn pipeline_runtime_opt_outs_are_injected_empty() {
    let cmd = build_docker_command(&cfg(), &worker(false), ScriptModule::RunCleanup, &[]);
    assert!(cmd.contains("-e XR_PIPELINE_API_URL= "));
    assert!(cmd.contains("-e XR_PIPELINE_EXTRA_LOGGERS="));
}
