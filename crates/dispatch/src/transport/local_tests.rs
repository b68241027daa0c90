// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn captures_stdout_of_successful_commands() {
    let out = run_local("echo deadbeefcafe").await.unwrap();
    assert_eq!(out.trim(), "deadbeefcafe");
}

#[tokio::test]
async fn nonzero_exit_maps_to_exec_error() {
    let err = run_local("echo broken >&2; exit 125").await.unwrap_err();
    match err {
        DispatchError::Exec { exit_code, stderr } => {
            assert_eq!(exit_code, 125);
            assert!(stderr.contains("broken"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
