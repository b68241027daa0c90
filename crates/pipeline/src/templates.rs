// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nuclei template repository resolution.
//!
//! Git sync is another subsystem's job; the pipeline only needs names
//! resolved to materialized working copies so it can build repeated
//! `-t <path>` fragments.

use crate::PipelineError;
use async_trait::async_trait;
use std::path::PathBuf;
use xr_store::TemplateRepos;

#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Local working copy for a named template repository.
    async fn ensure_local(&self, repo_name: &str) -> Result<PathBuf, PipelineError>;
}

/// Catalog backed by the `nuclei_template_repo` table.
#[derive(Clone)]
pub struct StoreTemplateCatalog {
    repos: TemplateRepos,
}

impl StoreTemplateCatalog {
    pub fn new(repos: TemplateRepos) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl TemplateCatalog for StoreTemplateCatalog {
    async fn ensure_local(&self, repo_name: &str) -> Result<PathBuf, PipelineError> {
        let row = self
            .repos
            .get_by_name(repo_name)
            .await
            .map_err(|e| PipelineError::Config(format!("template repo {repo_name}: {e}")))?;
        if row.local_path.is_empty() {
            return Err(PipelineError::Config(format!(
                "template repo {repo_name} has no local working copy"
            )));
        }
        Ok(PathBuf::from(row.local_path))
    }
}

/// `-t a -t b` fragment for the nuclei command line.
pub fn template_args(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("-t {}", p.display()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
