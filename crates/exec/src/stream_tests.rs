// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::CommandExecutor;
use serial_test::serial;

fn executor() -> CommandExecutor {
    CommandExecutor::new(ExecConfig::unthrottled())
}

#[tokio::test]
#[serial]
async fn yields_sanitized_lines_and_final_outcome() {
    let req = StreamRequest::new("printer", "printf 'one\\n\\n\\x1b[32mtwo\\x1b[0m\\n'");
    let mut stream = executor().execute_stream(req);

    assert_eq!(stream.next_line().await.as_deref(), Some("one"));
    assert_eq!(stream.next_line().await.as_deref(), Some("two"));
    assert_eq!(stream.next_line().await, None);

    let outcome = stream.finish().await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.exit_code, 0);
}

#[tokio::test]
#[serial]
async fn dropping_the_stream_kills_the_child_promptly() {
    let req = StreamRequest::new("hanger", "echo first; sleep 30");
    let mut stream = executor().execute_stream(req);
    assert_eq!(stream.next_line().await.as_deref(), Some("first"));

    let start = std::time::Instant::now();
    // finish() cancels the worker, which must kill the sleeping child and
    // report back well inside the grace window.
    let result = stream.finish().await;
    assert!(
        start.elapsed() < Duration::from_secs(6),
        "kill took {:?}",
        start.elapsed()
    );
    // Killed child: either a reported outcome with non-zero exit or an
    // early-cancel error, never a hang.
    if let Ok(outcome) = result {
        assert!(!outcome.success);
    }
}

#[tokio::test]
#[serial]
async fn timeout_surfaces_and_reaps() {
    let req = StreamRequest::new("slow", "sleep 30").timeout(Duration::from_secs(1));
    let mut stream = executor().execute_stream(req);

    let start = std::time::Instant::now();
    assert_eq!(stream.next_line().await, None);
    let err = stream.finish().await.unwrap_err();
    assert!(matches!(err, ExecError::Timeout { .. }), "got: {err}");
    assert!(start.elapsed() < Duration::from_secs(7));
}

#[tokio::test]
#[serial]
async fn lines_are_appended_to_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("stream.log");
    let req = StreamRequest::new("printer", "printf 'alpha\\nbeta\\n'").log_file(&log);

    let mut stream = executor().execute_stream(req);
    while stream.next_line().await.is_some() {}
    stream.finish().await.unwrap();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("alpha\n"));
    assert!(contents.contains("beta\n"));
    assert!(contents.contains("# Exit code: 0"));
}

#[tokio::test]
#[serial]
async fn suffix_char_is_stripped_from_every_line() {
    let req = StreamRequest::new("dots", "printf 'a.example.com.\\nb.example.com.\\n'")
        .suffix_char('.');
    let mut stream = executor().execute_stream(req);
    assert_eq!(stream.next_line().await.as_deref(), Some("a.example.com"));
    assert_eq!(stream.next_line().await.as_deref(), Some("b.example.com"));
}
