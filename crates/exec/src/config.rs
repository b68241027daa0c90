// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor tuning knobs, read once from the environment.

use std::time::Duration;

/// Admission and logging configuration for the command executor.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// CPU high-water mark (percent). Launches wait while at or above.
    pub cpu_high: f64,
    /// Memory high-water mark (percent).
    pub mem_high: f64,
    /// Poll interval while the host is over a high-water mark.
    pub load_check_interval: Duration,
    /// Unconditional delay before every launch, giving previously started
    /// commands time to show up in the load numbers.
    pub startup_delay: Duration,
    /// When false, log files receive stderr only (no header/footer/stdout).
    pub command_logging: bool,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            cpu_high: 90.0,
            mem_high: 80.0,
            load_check_interval: Duration::from_secs(30),
            startup_delay: Duration::from_secs(5),
            command_logging: true,
        }
    }
}

impl ExecConfig {
    /// Read overrides from `SCAN_CPU_HIGH`, `SCAN_MEM_HIGH`,
    /// `SCAN_LOAD_CHECK_INTERVAL`, `SCAN_COMMAND_STARTUP_DELAY` and
    /// `ENABLE_COMMAND_LOGGING`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cpu_high: env_parse("SCAN_CPU_HIGH").unwrap_or(defaults.cpu_high),
            mem_high: env_parse("SCAN_MEM_HIGH").unwrap_or(defaults.mem_high),
            load_check_interval: env_parse("SCAN_LOAD_CHECK_INTERVAL")
                .map(Duration::from_secs)
                .unwrap_or(defaults.load_check_interval),
            startup_delay: env_parse("SCAN_COMMAND_STARTUP_DELAY")
                .map(Duration::from_secs)
                .unwrap_or(defaults.startup_delay),
            command_logging: env_parse::<String>("ENABLE_COMMAND_LOGGING")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.command_logging),
        }
    }

    /// Configuration suitable for tests: no startup delay, no load gate.
    pub fn unthrottled() -> Self {
        Self {
            cpu_high: f64::INFINITY,
            mem_high: f64::INFINITY,
            load_check_interval: Duration::from_millis(10),
            startup_delay: Duration::ZERO,
            command_logging: true,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
