// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn slot_guard_balances_counter_on_drop() {
    let before = active_commands();
    {
        let _a = CommandSlot::acquire("subfinder");
        let _b = CommandSlot::acquire("naabu");
        assert_eq!(active_commands(), before + 2);
    }
    assert_eq!(active_commands(), before);
}

#[test]
#[serial]
fn counter_never_underflows() {
    let before = active_commands();
    drop(CommandSlot::acquire("httpx"));
    assert_eq!(active_commands(), before);
}

#[tokio::test]
#[serial]
async fn unthrottled_config_admits_immediately() {
    let cfg = ExecConfig::unthrottled();
    // Must return without looping; the infinite thresholds admit any load.
    tokio::time::timeout(Duration::from_secs(5), wait_for_capacity(&cfg))
        .await
        .expect("admission should not block under unthrottled config");
}

#[tokio::test]
async fn host_load_sample_is_in_percent_range() {
    let (cpu, mem) = sample_host_load().await;
    assert!((0.0..=100.0).contains(&mem), "mem={mem}");
    assert!(cpu >= 0.0, "cpu={cpu}");
}
