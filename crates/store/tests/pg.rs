// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upsert-law tests against a live Postgres.
//!
//! Run with `XR_TEST_DATABASE_URL` pointing at a scratch database:
//! `cargo test -p xr-store -- --ignored`.

use xr_core::{EndpointRecord, HostPortRecord, ScanId, SubdomainRecord, TargetKind};
use xr_store::Stores;

async fn stores() -> Stores {
    let url = std::env::var("XR_TEST_DATABASE_URL")
        .expect("XR_TEST_DATABASE_URL must point at a scratch database");
    let pool = xr_store::connect(&url).await.expect("connect and migrate");
    Stores::new(pool)
}

#[tokio::test]
#[ignore = "needs a live postgres (XR_TEST_DATABASE_URL)"]
async fn subdomain_upsert_is_idempotent() {
    let stores = stores().await;
    let target = stores
        .targets
        .create(&format!("idem-{}.example.com", std::process::id()), TargetKind::Domain)
        .await
        .unwrap();

    let batch = vec![
        SubdomainRecord::new(target.target_id(), "a.example.com").unwrap(),
        SubdomainRecord::new(target.target_id(), "b.example.com").unwrap(),
    ];
    stores.subdomains.bulk_insert_ignore(&batch).await.unwrap();
    stores.subdomains.bulk_insert_ignore(&batch).await.unwrap();

    assert_eq!(stores.subdomains.count_by_target(target.target_id()).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "needs a live postgres (XR_TEST_DATABASE_URL)"]
async fn endpoint_conflict_updates_metadata_but_not_discovered_at() {
    let stores = stores().await;
    let target = stores
        .targets
        .create(&format!("meta-{}.example.com", std::process::id()), TargetKind::Domain)
        .await
        .unwrap();

    let mut first = EndpointRecord::new(target.target_id(), "https://a.example.com/").unwrap();
    first.meta.status_code = Some(200);
    stores.endpoints.bulk_upsert(&[first]).await.unwrap();

    let mut second = EndpointRecord::new(target.target_id(), "https://a.example.com/").unwrap();
    second.meta.status_code = Some(404);
    stores.endpoints.bulk_upsert(&[second]).await.unwrap();

    assert_eq!(stores.endpoints.count_by_target(target.target_id()).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "needs a live postgres (XR_TEST_DATABASE_URL)"]
async fn wordlist_registration_records_hash_and_line_count() {
    let stores = stores().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("common.txt");
    std::fs::write(&path, "admin\nbackup\nlogin\n").unwrap();

    let row = stores
        .wordlists
        .register_file(&format!("common-{}", std::process::id()), "small list", &path)
        .await
        .unwrap();
    assert_eq!(row.line_count, 3);
    assert_eq!(row.file_hash.len(), 64);

    // Re-registering the same name refreshes in place.
    std::fs::write(&path, "admin\n").unwrap();
    let row = stores
        .wordlists
        .register_file(&row.name, "small list", &path)
        .await
        .unwrap();
    assert_eq!(row.line_count, 1);
}

#[tokio::test]
#[ignore = "needs a live postgres (XR_TEST_DATABASE_URL)"]
async fn snapshot_batch_for_deleted_scan_is_dropped_silently() {
    let stores = stores().await;
    let target = stores
        .targets
        .create(&format!("drop-{}.example.com", std::process::id()), TargetKind::Domain)
        .await
        .unwrap();
    let engine = stores.engines.create(&format!("drop-{}", std::process::id()), "").await.unwrap();
    let scan = stores
        .scans
        .create(target.target_id(), xr_core::EngineId::new(engine.id), "ws")
        .await
        .unwrap();

    stores.scans.soft_delete(&[scan.scan_id()]).await.unwrap();

    let batch = vec![HostPortRecord::new(target.target_id(), "a.example.com", "10.0.0.1", 443).unwrap()];
    let written = stores
        .snapshots
        .save_and_sync_host_ports(ScanId::new(scan.id), &batch)
        .await
        .unwrap();
    assert_eq!(written, 0);
}
