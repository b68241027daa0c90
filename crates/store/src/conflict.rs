// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-entity upsert conflict schemas.
//!
//! Dedup semantics live here as data, not in scattered SQL strings: each
//! asset table declares its natural key and exactly which columns a
//! conflicting insert may overwrite. `discovered_at` appears in no update
//! set, which is what makes first-seen timestamps immutable.

/// Conflict handling for one asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictSchema {
    pub table: &'static str,
    /// Columns of the natural key (must match a unique constraint).
    pub conflict_target: &'static [&'static str],
    /// Columns overwritten on conflict; empty means `DO NOTHING`.
    pub update_columns: &'static [&'static str],
}

/// Subdomains are pure presence records: conflicts are ignored.
pub const SUBDOMAIN: ConflictSchema = ConflictSchema {
    table: "subdomain",
    conflict_target: &["name", "target_id"],
    update_columns: &[],
};

/// Endpoints refresh all probe metadata on re-discovery.
pub const ENDPOINT: ConflictSchema = ConflictSchema {
    table: "endpoint",
    conflict_target: &["url", "target_id"],
    update_columns: &[
        "host",
        "location",
        "title",
        "webserver",
        "body_preview",
        "content_type",
        "tech",
        "status_code",
        "content_length",
        "vhost",
        "matched_gf_patterns",
    ],
};

/// Websites refresh all probe metadata on re-discovery.
pub const WEBSITE: ConflictSchema = ConflictSchema {
    table: "website",
    conflict_target: &["url", "target_id"],
    update_columns: &[
        "host",
        "location",
        "title",
        "webserver",
        "body_preview",
        "content_type",
        "tech",
        "status_code",
        "content_length",
        "vhost",
    ],
};

/// Directories refresh response stats (and the denormalized target ref).
pub const DIRECTORY: ConflictSchema = ConflictSchema {
    table: "directory",
    conflict_target: &["website_id", "url"],
    update_columns: &[
        "target_id",
        "status",
        "content_length",
        "words",
        "lines",
        "content_type",
        "duration",
    ],
};

/// Host/ip/port triples are presence records: conflicts are ignored.
pub const HOST_PORT_MAPPING: ConflictSchema = ConflictSchema {
    table: "host_port_mapping",
    conflict_target: &["target_id", "host", "ip", "port"],
    update_columns: &[],
};

impl ConflictSchema {
    /// Render the `ON CONFLICT …` clause for a bulk insert.
    pub fn on_conflict_clause(&self) -> String {
        let target = self.conflict_target.join(", ");
        if self.update_columns.is_empty() {
            return format!(" ON CONFLICT ({target}) DO NOTHING");
        }
        let updates: Vec<String> = self
            .update_columns
            .iter()
            .map(|col| format!("{col} = EXCLUDED.{col}"))
            .collect();
        format!(
            " ON CONFLICT ({target}) DO UPDATE SET {}",
            updates.join(", ")
        )
    }
}

#[cfg(test)]
#[path = "conflict_tests.rs"]
mod tests;
