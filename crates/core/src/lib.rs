// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xr-core: shared domain types for the xingrin scan platform.
//!
//! Everything here is plain data: identifiers, status enums, asset
//! records and the capability traits that let the dispatcher observe
//! worker liveness without depending on a concrete registry.

pub mod assets;
pub mod id;
pub mod liveness;
pub mod macros;
pub mod scan;
pub mod severity;
pub mod stage;
pub mod target;
pub mod worker;

pub use assets::{
    DirectoryRecord, EndpointRecord, HostPortRecord, HttpMeta, SubdomainRecord,
    VulnerabilityRecord, WebsiteRecord,
};
pub use id::{EngineId, OrganizationId, ScanId, TargetId, WebsiteId, WorkerId};
pub use liveness::{LivenessError, LoadSample, WorkerLiveness};
pub use scan::ScanStatus;
pub use severity::VulnSeverity;
pub use stage::ScanStage;
pub use target::TargetKind;
pub use worker::{advance_on_heartbeat, HeartbeatTransition, WorkerStatus};

use thiserror::Error;

/// Validation failures on domain data.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("port out of range: {0} (expected 1..=65535)")]
    PortOutOfRange(u32),
    #[error("cvss score out of range: {0} (expected 0.0..=10.0)")]
    CvssOutOfRange(f64),
    #[error("empty value for required field: {0}")]
    EmptyField(&'static str),
}
