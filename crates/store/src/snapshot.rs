// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot + canonical dual write.
//!
//! `save_and_sync_*` is the single entry point batches take from the
//! ingestors: verify the owning scan still exists (a scan deleted between
//! dispatch and ingestion silently swallows the batch), append the
//! scan-scoped snapshot rows, then upsert into the canonical table with
//! the per-entity conflict schema.

use crate::repos::{
    directory::DirectoryRepo, endpoint::EndpointRepo, host_port::HostPortRepo, scan::ScanRepo,
    subdomain::SubdomainRepo, vulnerability::VulnerabilityRepo, website::WebsiteRepo,
};
use crate::{StoreError, BATCH_SIZE};
use sqlx::{PgPool, QueryBuilder};
use xr_core::{
    DirectoryRecord, EndpointRecord, HostPortRecord, ScanId, SubdomainRecord, VulnerabilityRecord,
    WebsiteRecord,
};

#[derive(Clone)]
pub struct SnapshotStore {
    pool: PgPool,
    scans: ScanRepo,
    subdomains: SubdomainRepo,
    endpoints: EndpointRepo,
    websites: WebsiteRepo,
    directories: DirectoryRepo,
    host_ports: HostPortRepo,
    vulnerabilities: VulnerabilityRepo,
}

impl SnapshotStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            scans: ScanRepo::new(pool.clone()),
            subdomains: SubdomainRepo::new(pool.clone()),
            endpoints: EndpointRepo::new(pool.clone()),
            websites: WebsiteRepo::new(pool.clone()),
            directories: DirectoryRepo::new(pool.clone()),
            host_ports: HostPortRepo::new(pool.clone()),
            vulnerabilities: VulnerabilityRepo::new(pool.clone()),
            pool,
        }
    }

    /// Guard shared by every `save_and_sync_*`: a deleted scan swallows
    /// the batch without error.
    async fn scan_is_live(&self, scan_id: ScanId, count: usize) -> Result<bool, StoreError> {
        if self.scans.exists(scan_id).await? {
            return Ok(true);
        }
        tracing::warn!(%scan_id, dropped = count, "scan deleted, dropping snapshot batch");
        Ok(false)
    }

    pub async fn save_and_sync_subdomains(
        &self,
        scan_id: ScanId,
        items: &[SubdomainRecord],
    ) -> Result<u64, StoreError> {
        if items.is_empty() || !self.scan_is_live(scan_id, items.len()).await? {
            return Ok(0);
        }
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb =
                QueryBuilder::new("INSERT INTO subdomain_snapshot (scan_id, target_id, name) ");
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(scan_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.name);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        self.subdomains.bulk_insert_ignore(items).await?;
        Ok(items.len() as u64)
    }

    pub async fn save_and_sync_endpoints(
        &self,
        scan_id: ScanId,
        items: &[EndpointRecord],
    ) -> Result<u64, StoreError> {
        if items.is_empty() || !self.scan_is_live(scan_id, items.len()).await? {
            return Ok(0);
        }
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO endpoint_snapshot (scan_id, target_id, url, host, location, title, \
                 webserver, body_preview, content_type, tech, status_code, content_length, \
                 vhost, matched_gf_patterns) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(scan_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(&item.meta.host)
                    .push_bind(&item.meta.location)
                    .push_bind(&item.meta.title)
                    .push_bind(&item.meta.webserver)
                    .push_bind(&item.meta.body_preview)
                    .push_bind(&item.meta.content_type)
                    .push_bind(&item.meta.tech)
                    .push_bind(item.meta.status_code)
                    .push_bind(item.meta.content_length)
                    .push_bind(item.meta.vhost)
                    .push_bind(&item.matched_gf_patterns);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        self.endpoints.bulk_upsert(items).await?;
        Ok(items.len() as u64)
    }

    pub async fn save_and_sync_websites(
        &self,
        scan_id: ScanId,
        items: &[WebsiteRecord],
    ) -> Result<u64, StoreError> {
        if items.is_empty() || !self.scan_is_live(scan_id, items.len()).await? {
            return Ok(0);
        }
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO website_snapshot (scan_id, target_id, url, host, location, title, \
                 webserver, body_preview, content_type, tech, status_code, content_length, vhost) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(scan_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(&item.meta.host)
                    .push_bind(&item.meta.location)
                    .push_bind(&item.meta.title)
                    .push_bind(&item.meta.webserver)
                    .push_bind(&item.meta.body_preview)
                    .push_bind(&item.meta.content_type)
                    .push_bind(&item.meta.tech)
                    .push_bind(item.meta.status_code)
                    .push_bind(item.meta.content_length)
                    .push_bind(item.meta.vhost);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        self.websites.bulk_upsert(items).await?;
        Ok(items.len() as u64)
    }

    pub async fn save_and_sync_directories(
        &self,
        scan_id: ScanId,
        items: &[DirectoryRecord],
    ) -> Result<u64, StoreError> {
        if items.is_empty() || !self.scan_is_live(scan_id, items.len()).await? {
            return Ok(0);
        }
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO directory_snapshot (scan_id, website_id, target_id, url, status, \
                 content_length, words, lines, content_type, duration) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(scan_id.get())
                    .push_bind(item.website_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(item.status)
                    .push_bind(item.content_length)
                    .push_bind(item.words)
                    .push_bind(item.lines)
                    .push_bind(&item.content_type)
                    .push_bind(item.duration);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        self.directories.bulk_upsert(items).await?;
        Ok(items.len() as u64)
    }

    pub async fn save_and_sync_host_ports(
        &self,
        scan_id: ScanId,
        items: &[HostPortRecord],
    ) -> Result<u64, StoreError> {
        if items.is_empty() || !self.scan_is_live(scan_id, items.len()).await? {
            return Ok(0);
        }
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO host_port_mapping_snapshot (scan_id, target_id, host, ip, port) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(scan_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.host)
                    .push_bind(&item.ip)
                    .push_bind(item.port as i32);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        self.host_ports.bulk_insert_ignore(items).await?;
        Ok(items.len() as u64)
    }

    pub async fn save_and_sync_vulnerabilities(
        &self,
        scan_id: ScanId,
        items: &[VulnerabilityRecord],
    ) -> Result<u64, StoreError> {
        if items.is_empty() || !self.scan_is_live(scan_id, items.len()).await? {
            return Ok(0);
        }
        for chunk in items.chunks(BATCH_SIZE) {
            let mut tx = self.pool.begin().await?;
            let mut qb = QueryBuilder::new(
                "INSERT INTO vulnerability_snapshot (scan_id, target_id, url, vuln_type, \
                 severity, source, cvss_score, description, raw_output) ",
            );
            qb.push_values(chunk, |mut b, item| {
                b.push_bind(scan_id.get())
                    .push_bind(item.target_id.get())
                    .push_bind(&item.url)
                    .push_bind(&item.vuln_type)
                    .push_bind(item.severity.as_str())
                    .push_bind(&item.source)
                    .push_bind(item.cvss_score)
                    .push_bind(&item.description)
                    .push_bind(&item.raw_output);
            });
            qb.build().execute(&mut *tx).await?;
            tx.commit().await?;
        }
        self.vulnerabilities.bulk_append(items).await?;
        Ok(items.len() as u64)
    }
}
