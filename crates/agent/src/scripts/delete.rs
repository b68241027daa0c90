// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bulk delete entrypoints. Asset rows go with their parents through
//! foreign-key cascades; scan workspaces are removed from disk too.

use std::path::PathBuf;

pub async fn run_targets(ids: &[i64]) -> anyhow::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let (_config, stores) = super::bootstrap().await?;
    let removed = stores.targets.purge(ids).await?;
    tracing::info!(requested = ids.len(), removed, "targets purged");
    Ok(())
}

pub async fn run_organizations(ids: &[i64]) -> anyhow::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let (_config, stores) = super::bootstrap().await?;
    let removed = stores.organizations.purge(ids).await?;
    tracing::info!(requested = ids.len(), removed, "organizations purged");
    Ok(())
}

pub async fn run_scans(ids: &[i64]) -> anyhow::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let (config, stores) = super::bootstrap().await?;

    // Collect workspace paths before the rows disappear.
    let mut workspaces: Vec<PathBuf> = Vec::new();
    for id in ids {
        match stores.scans.get(xr_core::ScanId::new(*id)).await {
            Ok(row) if !row.scan_workspace_dir.is_empty() => {
                workspaces.push(PathBuf::from(&config.paths.results).join(row.scan_workspace_dir));
            }
            _ => {}
        }
    }

    let removed = stores.scans.purge(ids).await?;
    for workspace in workspaces {
        if let Err(e) = tokio::fs::remove_dir_all(&workspace).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(dir = %workspace.display(), error = %e, "workspace removal failed");
            }
        }
    }
    tracing::info!(requested = ids.len(), removed, "scans purged");
    Ok(())
}
