// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan tool command templates.
//!
//! A static two-level table keyed by (stage, tool). Each template is a
//! format string with `{placeholder}` slots plus optional fragments
//! appended when the tool config carries the matching key with a
//! non-empty value. Unknown (stage, tool) pairs are configuration
//! errors, surfaced at task-build time.

use crate::{PipelineError, ToolConfig};
use xr_core::ScanStage;

/// What the `base` template consumes as its primary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A file of lines (hosts, urls) fed via `{input_file}`.
    File,
    /// A literal domain via `{domain}`.
    Domain,
    /// A single site root via `{site_url}`.
    SiteUrl,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolTemplate {
    pub base: &'static str,
    /// (config key, fragment with `{value}` slot), appended in order.
    pub optional: &'static [(&'static str, &'static str)],
    pub input: InputKind,
}

/// Values substituted into `{placeholder}` slots.
#[derive(Debug, Clone, Default)]
pub struct CommandParams {
    pub domain: Option<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub site_url: Option<String>,
    pub wordlist: Option<String>,
    pub template_args: Option<String>,
}

pub fn template(stage: ScanStage, tool: &str) -> Option<&'static ToolTemplate> {
    match (stage, tool) {
        (ScanStage::SubdomainDiscovery, "subfinder") => Some(&SUBFINDER),
        (ScanStage::SubdomainDiscovery, "assetfinder") => Some(&ASSETFINDER),
        (ScanStage::PortScan, "naabu") => Some(&NAABU),
        (ScanStage::SiteScan, "httpx") => Some(&HTTPX),
        (ScanStage::UrlFetch, "katana") => Some(&KATANA),
        (ScanStage::UrlFetch, "gau") => Some(&GAU),
        (ScanStage::DirectoryScan, "ffuf") => Some(&FFUF),
        (ScanStage::VulnScan, "dalfox_xss") => Some(&DALFOX_XSS),
        (ScanStage::VulnScan, "nuclei") => Some(&NUCLEI),
        (ScanStage::VulnScan, "crlfuzz") => Some(&CRLFUZZ),
        _ => None,
    }
}

static SUBFINDER: ToolTemplate = ToolTemplate {
    base: "subfinder -d {domain} -all -silent -o {output_file}",
    optional: &[("threads", "-t {value}"), ("rate_limit", "-rl {value}")],
    input: InputKind::Domain,
};

static ASSETFINDER: ToolTemplate = ToolTemplate {
    base: "assetfinder --subs-only {domain} > {output_file}",
    optional: &[],
    input: InputKind::Domain,
};

static NAABU: ToolTemplate = ToolTemplate {
    base: "naabu -list {input_file} -silent -json",
    optional: &[
        ("ports", "-p {value}"),
        ("top_ports", "-top-ports {value}"),
        ("rate", "-rate {value}"),
    ],
    input: InputKind::File,
};

static HTTPX: ToolTemplate = ToolTemplate {
    base: "httpx -l {input_file} -silent -json -title -web-server -tech-detect -status-code \
           -content-length -content-type -location -follow-redirects",
    optional: &[("threads", "-threads {value}"), ("rate_limit", "-rl {value}")],
    input: InputKind::File,
};

static KATANA: ToolTemplate = ToolTemplate {
    base: "katana -list {input_file} -silent -o {output_file}",
    optional: &[("depth", "-d {value}"), ("concurrency", "-c {value}")],
    input: InputKind::File,
};

static GAU: ToolTemplate = ToolTemplate {
    base: "cat {input_file} | gau --subs > {output_file}",
    optional: &[("threads", "--threads {value}")],
    input: InputKind::File,
};

static FFUF: ToolTemplate = ToolTemplate {
    base: "ffuf -u {site_url}/FUZZ -w {wordlist} -of json -o {output_file}",
    optional: &[
        ("extensions", "-e {value}"),
        ("match_codes", "-mc {value}"),
        ("threads", "-t {value}"),
    ],
    input: InputKind::SiteUrl,
};

static DALFOX_XSS: ToolTemplate = ToolTemplate {
    base: "dalfox file {input_file} --silence --format json --skip-bav",
    optional: &[("worker", "--worker {value}"), ("blind", "-b {value}")],
    input: InputKind::File,
};

static NUCLEI: ToolTemplate = ToolTemplate {
    base: "nuclei -l {input_file} -silent -jsonl {template_args}",
    optional: &[
        ("rate_limit", "-rl {value}"),
        ("concurrency", "-c {value}"),
        ("severity", "-severity {value}"),
    ],
    input: InputKind::File,
};

static CRLFUZZ: ToolTemplate = ToolTemplate {
    base: "crlfuzz -l {input_file} -s -o {output_file}",
    optional: &[("concurrency", "-c {value}")],
    input: InputKind::File,
};

/// Build the full shell command for (stage, tool).
pub fn build_scan_command(
    stage: ScanStage,
    tool: &str,
    params: &CommandParams,
    config: &ToolConfig,
) -> Result<String, PipelineError> {
    let template = template(stage, tool).ok_or_else(|| {
        PipelineError::Config(format!("no command template for {tool} in stage {stage}"))
    })?;

    let mut command = template.base.to_string();
    substitute(&mut command, "{domain}", params.domain.as_deref());
    substitute(&mut command, "{input_file}", params.input_file.as_deref());
    substitute(&mut command, "{output_file}", params.output_file.as_deref());
    substitute(&mut command, "{site_url}", params.site_url.as_deref());
    substitute(&mut command, "{wordlist}", params.wordlist.as_deref());
    substitute(&mut command, "{template_args}", params.template_args.as_deref());

    if let Some(start) = command.find('{') {
        let end = command[start..].find('}').map(|i| start + i + 1).unwrap_or(command.len());
        return Err(PipelineError::Config(format!(
            "unresolved placeholder {} for {tool}",
            &command[start..end]
        )));
    }

    for (key, fragment) in template.optional {
        if let Some(value) = config_value(config, key) {
            command.push(' ');
            command.push_str(&fragment.replace("{value}", &value));
        }
    }

    Ok(command.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn substitute(command: &mut String, placeholder: &str, value: Option<&str>) {
    if let Some(value) = value {
        if command.contains(placeholder) {
            *command = command.replace(placeholder, value);
        }
    }
}

/// Non-empty config value rendered for a fragment; `false`/null/empty
/// disable the fragment.
fn config_value(config: &ToolConfig, key: &str) -> Option<String> {
    match config.get(key)? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
