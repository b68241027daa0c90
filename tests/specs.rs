// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level scenarios exercising several crates together,
//! without external services.

use std::time::Duration;
use xr_core::{LoadSample, TargetId, WorkerId, WorkerLiveness};
use xr_dispatch::{
    build_docker_command, DispatchConfig, MemoryDirectory, RecordingSignals, ScriptModule,
    TaskDispatcher,
};
use xr_exec::{sanitize, CommandExecutor, ExecConfig, StreamRequest};
use xr_registry::MemoryLoadRegistry;
use xr_store::WorkerRow;

fn worker_row(id: i64, name: &str, is_local: bool) -> WorkerRow {
    WorkerRow {
        id,
        name: name.into(),
        ip_address: format!("10.1.0.{id}"),
        ssh_port: 22,
        username: "root".into(),
        password: String::new(),
        is_local,
        status: "online".into(),
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

/// Two workers, one overloaded: the scheduler must pick the healthy one
/// without waiting or signalling.
#[tokio::test]
async fn scheduling_prefers_the_unloaded_worker() {
    let registry = MemoryLoadRegistry::new();
    registry
        .update(WorkerId::new(1), LoadSample::new(20.0, 30.0))
        .await
        .unwrap();
    registry
        .update(WorkerId::new(2), LoadSample::new(92.0, 40.0))
        .await
        .unwrap();

    let mut cfg = DispatchConfig::for_image("xingrin/worker:spec", "spec");
    cfg.high_load_wait = Duration::from_millis(10);
    let signals = RecordingSignals::default();
    let dispatcher = TaskDispatcher::new(
        cfg,
        MemoryDirectory::new(vec![worker_row(1, "calm", false), worker_row(2, "busy", false)]),
        registry,
        signals.clone(),
    );

    let best = dispatcher.select_best_worker().await.unwrap().unwrap();
    assert_eq!(best.name, "calm");
    assert!(signals.high_load.lock().is_empty());
}

/// The selected worker's docker command carries the full launch
/// contract for the scan flow.
#[test]
fn scan_flow_container_command_is_complete() {
    let mut cfg = DispatchConfig::for_image("xingrin/worker:v2", "v2");
    cfg.public_host = "198.51.100.7".into();
    let cmd = build_docker_command(
        &cfg,
        &worker_row(3, "edge", false),
        ScriptModule::RunInitiateScan,
        &[
            ("scan_id", "41".into()),
            ("target_name", "example.com".into()),
            ("target_id", "9".into()),
            ("scan_workspace_dir", "scan_9_20260801_120000".into()),
            ("engine_name", "full audit".into()),
        ],
    );

    assert!(cmd.starts_with("docker run --rm -d --pull=missing"));
    assert!(cmd.contains(&format!(
        "-e SERVER_URL={}",
        shlex::try_quote("http://198.51.100.7:8000").unwrap()
    )));
    assert!(cmd.contains("-e IS_LOCAL=false"));
    assert!(cmd.contains("-v /opt/xingrin/results:/app/results"));
    assert!(cmd.contains("--scan_id=41"));
    assert!(cmd.contains(&format!(
        "--engine_name={}",
        shlex::try_quote("full audit").unwrap()
    )));
    assert!(cmd.contains("xingrin-worker run_initiate_scan"));
}

/// A streaming tool emitting colored, padded output arrives sanitized,
/// and the subprocess is fully reaped once the consumer is done.
#[tokio::test]
async fn streaming_round_trip_sanitizes_and_reaps() {
    let executor = CommandExecutor::new(ExecConfig::unthrottled());
    let request = StreamRequest::new(
        "fixture",
        "printf '  \\x1b[32ma.example.com\\x1b[0m  \\n\\nnoise\\x00\\n'",
    );
    let mut stream = executor.execute_stream(request);

    assert_eq!(stream.next_line().await.as_deref(), Some("a.example.com"));
    assert_eq!(stream.next_line().await.as_deref(), Some("noise"));
    assert_eq!(stream.next_line().await, None);
    let outcome = stream.finish().await.unwrap();
    assert!(outcome.success);
}

/// The sanitize pipeline and the subdomain parser agree end to end.
#[test]
fn sanitized_tool_output_parses_into_assets() {
    let raw = "\x1b[35mwww.Example.COM.\x1b[0m\r";
    let clean = sanitize::clean_line(raw, Some('.')).unwrap();
    let record =
        xr_pipeline::ingest::subfinder::parse_line(TargetId::new(7), &clean).unwrap();
    assert_eq!(record.name, "www.example.com");
}
