// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target classification.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What kind of thing a target name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Domain,
    Ip,
    Cidr,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Domain => "domain",
            TargetKind::Ip => "ip",
            TargetKind::Cidr => "cidr",
        }
    }
}

crate::simple_display! {
    TargetKind {
        Domain => "domain",
        Ip => "ip",
        Cidr => "cidr",
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain" => Ok(TargetKind::Domain),
            "ip" => Ok(TargetKind::Ip),
            "cidr" => Ok(TargetKind::Cidr),
            other => Err(format!("unknown target kind: {other}")),
        }
    }
}
