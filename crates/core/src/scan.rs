// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a scan run.
///
/// `Initiated → Running → {Completed | Failed | Cancelled}`. Terminal
/// states never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Initiated,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Initiated => "initiated",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
            ScanStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanStatus::Completed | ScanStatus::Failed | ScanStatus::Cancelled
        )
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: ScanStatus) -> bool {
        match (self, next) {
            (ScanStatus::Initiated, ScanStatus::Running) => true,
            (ScanStatus::Initiated, ScanStatus::Failed) => true,
            (ScanStatus::Initiated, ScanStatus::Cancelled) => true,
            (ScanStatus::Running, s) if s.is_terminal() => true,
            _ => false,
        }
    }
}

crate::simple_display! {
    ScanStatus {
        Initiated => "initiated",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl FromStr for ScanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiated" => Ok(ScanStatus::Initiated),
            "running" => Ok(ScanStatus::Running),
            "completed" => Ok(ScanStatus::Completed),
            "failed" => Ok(ScanStatus::Failed),
            "cancelled" => Ok(ScanStatus::Cancelled),
            other => Err(format!("unknown scan status: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
