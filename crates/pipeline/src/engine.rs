// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration: which tools run per stage, with what knobs.
//!
//! The configuration payload is stored as opaque text on the scan engine
//! row; the pipeline parses it here. Unknown stages and unknown keys are
//! carried but ignored, so older workers tolerate newer configs.

use crate::PipelineError;
use serde::Deserialize;
use std::collections::HashMap;
use xr_core::ScanStage;

/// Per-tool settings: free-form keys consumed by the command builder
/// plus the shared `timeout` / `min_timeout` knobs.
pub type ToolConfig = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    stages: HashMap<String, StageTools>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StageTools {
    #[serde(default)]
    tools: HashMap<String, ToolConfig>,
}

impl EngineConfig {
    pub fn parse(configuration: &str) -> Result<Self, PipelineError> {
        if configuration.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(configuration)
            .map_err(|e| PipelineError::Config(format!("invalid engine configuration: {e}")))
    }

    /// Enabled tools for a stage. A tool with `"enabled": false` is off.
    pub fn tools(&self, stage: ScanStage) -> Vec<(String, ToolConfig)> {
        let Some(stage_tools) = self.stages.get(stage.as_str()) else {
            return Vec::new();
        };
        let mut tools: Vec<(String, ToolConfig)> = stage_tools
            .tools
            .iter()
            .filter(|(_, cfg)| {
                cfg.get("enabled")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true)
            })
            .map(|(name, cfg)| (name.clone(), cfg.clone()))
            .collect();
        tools.sort_by(|a, b| a.0.cmp(&b.0));
        tools
    }

    pub fn has_stage(&self, stage: ScanStage) -> bool {
        !self.tools(stage).is_empty()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
