// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: startup and the per-tick timer pass.

use crate::config::{Config, ConfigError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, warn};
use trig_core::{Clock, TriggerEvent};
use trig_engine::TimerPoller;
use trig_storage::{JsonStore, StoreError, TriggerStore};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log file path has no file name: {0}")]
    BadLogPath(std::path::PathBuf),
}

/// Daemon state during operation
pub struct DaemonState<C: Clock> {
    poller: TimerPoller<JsonStore>,
    clock: C,
}

/// Open the store and prepare the poller
pub fn startup<C: Clock>(config: &Config, clock: C) -> Result<DaemonState<C>, LifecycleError> {
    let store = JsonStore::open(&config.store_dir)?;
    let count = store.list()?.len();
    info!(
        store = %store.base_path().display(),
        triggers = count,
        poll_interval = ?config.poll_interval,
        "store opened"
    );

    Ok(DaemonState {
        poller: TimerPoller::new(store),
        clock,
    })
}

impl<C: Clock> DaemonState<C> {
    /// Evaluate timers once and publish what happened
    pub fn tick(&self) -> Vec<TriggerEvent> {
        let events = self.poller.tick(self.clock.now());
        for event in &events {
            publish(event);
        }
        events
    }
}

impl<C: Clock + Send + Sync + 'static> DaemonState<C> {
    /// Run [`tick`](Self::tick) on the blocking pool, off the runtime threads
    /// that drive signals and the interval.
    pub async fn tick_blocking(self: Arc<Self>) -> Result<Vec<TriggerEvent>, JoinError> {
        tokio::task::spawn_blocking(move || self.tick()).await
    }
}

/// Emit an event as a JSON log record for the policy service to pick up
fn publish(event: &TriggerEvent) {
    match serde_json::to_string(event) {
        Ok(json) => info!(event = event.name(), %json, "trigger event"),
        Err(e) => warn!(event = event.name(), error = %e, "failed to encode event"),
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
