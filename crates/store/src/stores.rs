// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-stop bundle of every repository over a shared pool.

use crate::repos::{
    directory::DirectoryRepo, endpoint::EndpointRepo, engine::EngineRepo, engine::TemplateRepos,
    host_port::HostPortRepo, organization::OrganizationRepo, scan::ScanRepo, subdomain::SubdomainRepo, target::TargetRepo,
    vulnerability::VulnerabilityRepo, website::WebsiteRepo, worker::WorkerRepo,
    wordlist::WordlistRepo,
};
use crate::SnapshotStore;
use sqlx::PgPool;

#[derive(Clone)]
pub struct Stores {
    pub targets: TargetRepo,
    pub organizations: OrganizationRepo,
    pub scans: ScanRepo,
    pub workers: WorkerRepo,
    pub engines: EngineRepo,
    pub template_repos: TemplateRepos,
    pub wordlists: WordlistRepo,
    pub subdomains: SubdomainRepo,
    pub websites: WebsiteRepo,
    pub endpoints: EndpointRepo,
    pub directories: DirectoryRepo,
    pub host_ports: HostPortRepo,
    pub vulnerabilities: VulnerabilityRepo,
    pub snapshots: SnapshotStore,
}

impl Stores {
    pub fn new(pool: PgPool) -> Self {
        Self {
            targets: TargetRepo::new(pool.clone()),
            organizations: OrganizationRepo::new(pool.clone()),
            scans: ScanRepo::new(pool.clone()),
            workers: WorkerRepo::new(pool.clone()),
            engines: EngineRepo::new(pool.clone()),
            template_repos: TemplateRepos::new(pool.clone()),
            wordlists: WordlistRepo::new(pool.clone()),
            subdomains: SubdomainRepo::new(pool.clone()),
            websites: WebsiteRepo::new(pool.clone()),
            endpoints: EndpointRepo::new(pool.clone()),
            directories: DirectoryRepo::new(pool.clone()),
            host_ports: HostPortRepo::new(pool.clone()),
            vulnerabilities: VulnerabilityRepo::new(pool.clone()),
            snapshots: SnapshotStore::new(pool),
        }
    }
}
