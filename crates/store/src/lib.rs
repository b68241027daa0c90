// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xr-store: the durable side of the platform.
//!
//! Postgres-backed repositories for targets, scans, workers and the six
//! asset tables, plus the snapshot dual-write. The one operation that
//! carries the platform's dedup guarantees is the bulk upsert: per-entity
//! conflict keys and update column sets live in [`conflict`] as static
//! data, and `discovered_at` is never in an update set.

pub mod conflict;
mod db;
mod error;
pub mod repos;
mod snapshot;
mod stores;

pub use db::{connect, MIGRATOR};
pub use error::StoreError;
pub use repos::directory::DirectoryRepo;
pub use repos::endpoint::EndpointRepo;
pub use repos::engine::{EngineRepo, ScanEngineRow, TemplateRepoRow, TemplateRepos};
pub use repos::host_port::HostPortRepo;
pub use repos::organization::{OrganizationRepo, OrganizationRow};
pub use repos::scan::{ScanRepo, ScanRow};
pub use repos::subdomain::SubdomainRepo;
pub use repos::target::{TargetRepo, TargetRow};
pub use repos::vulnerability::VulnerabilityRepo;
pub use repos::website::WebsiteRepo;
pub use repos::worker::{WorkerRepo, WorkerRow};
pub use repos::wordlist::{WordlistRepo, WordlistRow};
pub use snapshot::SnapshotStore;
pub use stores::Stores;

/// Rows per transaction chunk in bulk writes.
pub const BATCH_SIZE: usize = 1000;

/// Default chunk size for streaming exports.
pub const EXPORT_CHUNK: usize = 1000;
