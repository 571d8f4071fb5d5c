// SPDX-License-Identifier: MPL-2.0
//! Async driver that feeds the banner store.
//!
//! Owns the toast subscription and the periodic tick so the store itself
//! stays synchronous and deterministic. The driver task is cancellable and
//! aborted on teardown, so no orphaned timer keeps mutating a store whose
//! page is gone.

use super::BannerStore;
use crate::bus::EventBus;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to the running driver task. Dropping the handle stops the task.
#[derive(Debug)]
pub struct BannerDriver {
    task: JoinHandle<()>,
}

impl BannerDriver {
    /// Spawns the driver: subscribes to toast events and ticks the store
    /// at the given cadence.
    pub fn spawn(store: Arc<Mutex<BannerStore>>, bus: &EventBus, tick: Duration) -> Self {
        let mut events = bus.subscribe_toasts();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    received = events.recv() => match received {
                        Ok(event) => {
                            let mut store =
                                store.lock().unwrap_or_else(PoisonError::into_inner);
                            store.on_toast_event(&event);
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            log::warn!("banner driver lagged; skipped {} toast events", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = interval.tick() => {
                        let mut store = store.lock().unwrap_or_else(PoisonError::into_inner);
                        store.tick();
                    }
                }
            }
        });

        Self { task }
    }

    /// Stops the driver task.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for BannerDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
