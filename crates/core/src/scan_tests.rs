// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    start = { ScanStatus::Initiated, ScanStatus::Running, true },
    complete = { ScanStatus::Running, ScanStatus::Completed, true },
    fail = { ScanStatus::Running, ScanStatus::Failed, true },
    cancel = { ScanStatus::Running, ScanStatus::Cancelled, true },
    cancel_before_start = { ScanStatus::Initiated, ScanStatus::Cancelled, true },
    no_restart = { ScanStatus::Completed, ScanStatus::Running, false },
    no_resurrect = { ScanStatus::Cancelled, ScanStatus::Running, false },
    no_skip = { ScanStatus::Initiated, ScanStatus::Completed, false },
)]
fn transition_table(from: ScanStatus, to: ScanStatus, allowed: bool) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn terminal_states() {
    assert!(!ScanStatus::Initiated.is_terminal());
    assert!(!ScanStatus::Running.is_terminal());
    assert!(ScanStatus::Completed.is_terminal());
    assert!(ScanStatus::Failed.is_terminal());
    assert!(ScanStatus::Cancelled.is_terminal());
}
