// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn score_weights_cpu_heavier_than_memory() {
    let s = LoadSample::new(20.0, 30.0);
    assert!((s.score() - 23.0).abs() < f64::EPSILON);

    let s = LoadSample::new(50.0, 95.0);
    assert!((s.score() - 63.5).abs() < f64::EPSILON);
}

#[test]
fn overload_partition_uses_either_axis() {
    assert!(!LoadSample::new(85.0, 85.0).is_overloaded());
    assert!(LoadSample::new(85.1, 10.0).is_overloaded());
    assert!(LoadSample::new(10.0, 85.1).is_overloaded());
    assert!(LoadSample::new(92.0, 95.0).is_overloaded());
}
