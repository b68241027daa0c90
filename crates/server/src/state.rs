// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared application state.

use crate::Settings;
use std::sync::Arc;
use xr_dispatch::{BackgroundTasks, TaskDispatcher, TracingSignals, WorkerControl};
use xr_registry::{RedisLoadRegistry, UpdateLock};
use xr_store::{Stores, WorkerRepo};

pub type Dispatcher = TaskDispatcher<WorkerRepo, RedisLoadRegistry, TracingSignals>;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub stores: Stores,
    pub registry: RedisLoadRegistry,
    pub update_lock: UpdateLock,
    pub dispatcher: Arc<Dispatcher>,
    pub control: WorkerControl<TracingSignals>,
    pub background: BackgroundTasks,
}

impl AppState {
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let pool = xr_store::connect(&settings.database_url).await?;
        let stores = Stores::new(pool);

        let redis_client = redis_client(&settings.redis_url)?;
        let conn = redis::aio::ConnectionManager::new(redis_client).await?;
        let registry = RedisLoadRegistry::new(conn.clone());
        let update_lock = UpdateLock::new(conn);

        let background = BackgroundTasks::new();
        let signals = Arc::new(TracingSignals);
        let control = WorkerControl::new(stores.workers.clone(), background.clone(), signals);
        let dispatcher = Arc::new(TaskDispatcher::new(
            settings.dispatch.clone(),
            stores.workers.clone(),
            registry.clone(),
            TracingSignals,
        ));

        Ok(Self {
            settings: Arc::new(settings),
            stores,
            registry,
            update_lock,
            dispatcher,
            control,
            background,
        })
    }
}

fn redis_client(url: &str) -> anyhow::Result<redis::Client> {
    Ok(redis::Client::open(url)?)
}
