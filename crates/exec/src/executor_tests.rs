// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn executor() -> CommandExecutor {
    CommandExecutor::new(ExecConfig::unthrottled())
}

#[tokio::test]
#[serial]
async fn successful_command_reports_exit_zero() {
    let outcome = executor()
        .execute_and_wait("echo", "echo hello", Duration::from_secs(10), None)
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.exit_code, 0);
    assert!(outcome.log_file.is_none());
}

#[tokio::test]
#[serial]
async fn nonzero_exit_is_an_outcome_not_an_error() {
    let outcome = executor()
        .execute_and_wait("false", "exit 3", Duration::from_secs(10), None)
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.exit_code, 3);
}

#[tokio::test]
#[serial]
async fn output_is_teed_to_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("echo.log");
    let outcome = executor()
        .execute_and_wait(
            "echo",
            "echo from-the-tool; echo on-stderr >&2",
            Duration::from_secs(10),
            Some(&log),
        )
        .await
        .unwrap();
    assert!(outcome.success);

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.starts_with("$ echo from-the-tool"));
    assert!(contents.contains("from-the-tool"));
    assert!(contents.contains("on-stderr"));
    assert!(contents.contains("# Exit code: 0"));
}

#[tokio::test]
#[serial]
async fn timeout_kills_the_process_tree_within_grace() {
    let start = std::time::Instant::now();
    let err = executor()
        .execute_and_wait("sleeper", "sleep 30", Duration::from_secs(1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Timeout { .. }), "got: {err}");
    assert!(
        start.elapsed() < Duration::from_secs(7),
        "cleanup took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn rejects_empty_arguments() {
    let exec = executor();
    assert!(matches!(
        exec.execute_and_wait("", "echo x", Duration::from_secs(1), None).await,
        Err(ExecError::InvalidArg(_))
    ));
    assert!(matches!(
        exec.execute_and_wait("echo", "", Duration::from_secs(1), None).await,
        Err(ExecError::InvalidArg(_))
    ));
    assert!(matches!(
        exec.execute_and_wait("echo", "echo x", Duration::ZERO, None).await,
        Err(ExecError::InvalidArg(_))
    ));
}
