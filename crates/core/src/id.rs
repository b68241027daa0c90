// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Database-backed identifiers.

crate::db_id! {
    /// Primary key of a scan target.
    TargetId
}

crate::db_id! {
    /// Primary key of a scan run.
    ScanId
}

crate::db_id! {
    /// Primary key of a worker node.
    WorkerId
}

crate::db_id! {
    /// Primary key of a website asset (directories hang off it).
    WebsiteId
}

crate::db_id! {
    /// Primary key of a scan engine configuration.
    EngineId
}

crate::db_id! {
    /// Primary key of an organization.
    OrganizationId
}
