// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker command construction.
//!
//! Task containers receive exactly two injected environment variables —
//! `SERVER_URL` and `IS_LOCAL` — and bootstrap everything else from the
//! config center. The wrapped shell command first truncates the
//! per-module log to its last 10 000 lines, then appends.

use crate::DispatchConfig;
use std::fmt;
use xr_store::WorkerRow;

/// The fixed set of worker entrypoint modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptModule {
    RunInitiateScan,
    RunCleanup,
    RunDeleteTargets,
    RunDeleteOrganizations,
    RunDeleteScans,
}

impl ScriptModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptModule::RunInitiateScan => "run_initiate_scan",
            ScriptModule::RunCleanup => "run_cleanup",
            ScriptModule::RunDeleteTargets => "run_delete_targets",
            ScriptModule::RunDeleteOrganizations => "run_delete_organizations",
            ScriptModule::RunDeleteScans => "run_delete_scans",
        }
    }
}

impl fmt::Display for ScriptModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shell-quote one value. `shlex::try_quote` emits single-quoted words,
/// which nest inside the double-quoted `sh -c "…"` wrapper. NUL bytes
/// cannot survive an execve boundary and are stripped first; after that
/// quoting cannot fail.
fn quote(value: &str) -> String {
    let cleaned: String = value.chars().filter(|&c| c != '\0').collect();
    match shlex::try_quote(&cleaned) {
        Ok(quoted) => quoted.into_owned(),
        Err(_) => cleaned,
    }
}

/// Build the full `docker run` command line for a worker.
///
/// Local workers join the internal network and reach the server by
/// service name; remote workers get no `--network` and use the public
/// host. The image is pre-pulled at install time, so `--pull=missing`.
pub fn build_docker_command(
    cfg: &DispatchConfig,
    worker: &WorkerRow,
    module: ScriptModule,
    args: &[(&str, String)],
) -> String {
    let (network_arg, server_url) = if worker.is_local {
        (
            format!("--network {} ", cfg.docker_network_name),
            format!("http://server:{}", cfg.server_port),
        )
    } else {
        (
            String::new(),
            format!("http://{}:{}", cfg.public_host, cfg.server_port),
        )
    };

    let env_vars = format!(
        "-e SERVER_URL={} -e IS_LOCAL={} -e XR_PIPELINE_API_URL= -e XR_PIPELINE_EXTRA_LOGGERS=",
        quote(&server_url),
        if worker.is_local { "true" } else { "false" },
    );

    let volumes = format!(
        "-v {}:{} -v {}:{}",
        cfg.host_results_dir, cfg.container_results_mount, cfg.host_logs_dir, cfg.container_logs_mount,
    );

    let args_str = args
        .iter()
        .map(|(key, value)| format!("--{key}={}", quote(value)))
        .collect::<Vec<_>>()
        .join(" ");

    let log_file = format!("{}/container_{}.log", cfg.container_logs_mount, module);
    let inner_cmd = format!(
        "tail -n 10000 {log_file} > {log_file}.tmp 2>/dev/null; \
         mv {log_file}.tmp {log_file} 2>/dev/null; \
         xingrin-worker {module} {args_str} >> {log_file} 2>&1"
    );

    format!(
        "docker run --rm -d --pull=missing {network_arg}{env_vars} {volumes} {} sh -c \"{inner_cmd}\"",
        cfg.docker_image,
    )
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
