// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launch admission control.
//!
//! Before any external command starts, the executor waits out a fixed
//! startup delay and then polls host CPU/memory until both are below
//! their high-water marks. A process-wide counter tracks commands in
//! flight; the slot guard releases it on drop so every exit path —
//! success, timeout, cancellation, panic unwind — balances the count.

use crate::ExecConfig;
use parking_lot::Mutex;
use std::time::Duration;

static ACTIVE_COMMANDS: Mutex<u32> = Mutex::new(0);

/// Number of commands currently between launch and finalization.
pub fn active_commands() -> u32 {
    *ACTIVE_COMMANDS.lock()
}

/// RAII slot in the process-wide active-command count.
pub(crate) struct CommandSlot {
    tool: String,
}

impl CommandSlot {
    pub(crate) fn acquire(tool: &str) -> Self {
        let active = {
            let mut n = ACTIVE_COMMANDS.lock();
            *n += 1;
            *n
        };
        tracing::info!(tool, active, "command slot acquired");
        Self {
            tool: tool.to_string(),
        }
    }
}

impl Drop for CommandSlot {
    fn drop(&mut self) {
        let active = {
            let mut n = ACTIVE_COMMANDS.lock();
            *n = n.saturating_sub(1);
            *n
        };
        tracing::info!(tool = %self.tool, active, "command slot released");
    }
}

/// Block until the host has capacity for another command.
pub(crate) async fn wait_for_capacity(cfg: &ExecConfig) {
    if cfg.startup_delay > Duration::ZERO {
        tokio::time::sleep(cfg.startup_delay).await;
    }

    loop {
        let (cpu, mem) = sample_host_load().await;
        if cpu < cfg.cpu_high && mem < cfg.mem_high {
            return;
        }
        tracing::info!(
            cpu = %format_args!("{cpu:.1}"),
            cpu_high = cfg.cpu_high,
            mem = %format_args!("{mem:.1}"),
            mem_high = cfg.mem_high,
            "host load high, delaying command launch"
        );
        tokio::time::sleep(cfg.load_check_interval).await;
    }
}

/// Sample host CPU and memory utilization (percent).
///
/// CPU usage needs two refreshes separated by the sysinfo minimum
/// interval to produce a meaningful delta.
pub(crate) async fn sample_host_load() -> (f64, f64) {
    let mut sys = sysinfo::System::new();
    sys.refresh_cpu_usage();
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL.max(Duration::from_millis(200))).await;
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let cpu = sys.global_cpu_usage() as f64;
    let mem = if sys.total_memory() == 0 {
        0.0
    } else {
        sys.used_memory() as f64 / sys.total_memory() as f64 * 100.0
    };
    (cpu, mem)
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
