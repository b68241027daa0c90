// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    subdomain = { SUBDOMAIN },
    endpoint = { ENDPOINT },
    website = { WEBSITE },
    directory = { DIRECTORY },
    host_port = { HOST_PORT_MAPPING },
)]
fn discovered_at_is_never_overwritten(schema: ConflictSchema) {
    assert!(
        !schema.update_columns.contains(&"discovered_at"),
        "{} would clobber first-seen timestamps",
        schema.table
    );
    // The natural key itself is never in the update set either.
    for key_col in schema.conflict_target {
        assert!(!schema.update_columns.contains(key_col));
    }
}

#[test]
fn presence_records_ignore_conflicts() {
    assert!(SUBDOMAIN.update_columns.is_empty());
    assert!(HOST_PORT_MAPPING.update_columns.is_empty());
    assert_eq!(
        SUBDOMAIN.on_conflict_clause(),
        " ON CONFLICT (name, target_id) DO NOTHING"
    );
}

#[test]
fn metadata_records_overwrite_on_conflict() {
    let clause = ENDPOINT.on_conflict_clause();
    assert!(clause.starts_with(" ON CONFLICT (url, target_id) DO UPDATE SET "));
    assert!(clause.contains("status_code = EXCLUDED.status_code"));
    assert!(clause.contains("matched_gf_patterns = EXCLUDED.matched_gf_patterns"));
    assert!(!clause.contains("discovered_at"));

    let clause = DIRECTORY.on_conflict_clause();
    assert!(clause.contains("target_id = EXCLUDED.target_id"));
    assert!(clause.contains("duration = EXCLUDED.duration"));
}

#[test]
fn website_schema_has_no_gf_patterns() {
    assert!(!WEBSITE.update_columns.contains(&"matched_gf_patterns"));
}
