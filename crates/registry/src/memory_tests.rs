// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn update_then_lookup_round_trips() {
    let registry = MemoryLoadRegistry::new();
    let id = WorkerId::new(1);
    registry.update(id, LoadSample::new(20.0, 30.0)).await.unwrap();

    assert!(registry.is_online(id).await.unwrap());
    let loads = registry.get_all(&[id, WorkerId::new(2)]).await.unwrap();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[&id], LoadSample::new(20.0, 30.0));
}

#[tokio::test]
async fn expired_entries_read_as_offline() {
    let registry = MemoryLoadRegistry::with_ttl(Duration::from_millis(20));
    let id = WorkerId::new(7);
    registry.update(id, LoadSample::new(50.0, 50.0)).await.unwrap();
    assert!(registry.is_online(id).await.unwrap());

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert!(!registry.is_online(id).await.unwrap());
    assert!(registry.get_all(&[id]).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_the_entry() {
    let registry = MemoryLoadRegistry::new();
    let id = WorkerId::new(3);
    registry.update(id, LoadSample::new(1.0, 1.0)).await.unwrap();
    registry.delete(id).await.unwrap();
    assert!(!registry.is_online(id).await.unwrap());
}

#[tokio::test]
async fn heartbeat_refreshes_the_ttl() {
    let registry = MemoryLoadRegistry::with_ttl(Duration::from_millis(50));
    let id = WorkerId::new(4);
    registry.update(id, LoadSample::new(10.0, 10.0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    registry.update(id, LoadSample::new(11.0, 10.0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    // 60 ms after the first beat but only 30 ms after the refresh.
    assert!(registry.is_online(id).await.unwrap());
}
