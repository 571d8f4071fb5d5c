// SPDX-License-Identifier: MPL-2.0
//! Dedup/TTL queue that hands a toast from one page load to the next.
//!
//! A persisted toast is written as one record in a JSON array under a
//! well-known storage location. On the next mount the banner store drains
//! the queue exactly once: a single read-then-clear, a TTL filter, a
//! dedup-by-message pass, and a cap. Storage and parse failures are
//! fail-open: they behave like an empty queue and never propagate.

pub mod storage;

use crate::bus::Severity;
use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use storage::QueueStorage;

/// One persisted toast request, in the wire shape of the stored array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingToast {
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(
        default,
        rename = "linkText",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_text: Option<String>,
    /// Write timestamp in Unix milliseconds; drives replay eligibility.
    pub ts: u64,
}

/// Bounded, time-windowed record store for cross-navigation toasts.
pub struct PendingQueue {
    storage: Box<dyn QueueStorage>,
    clock: Arc<dyn Clock>,
}

impl PendingQueue {
    pub fn new(storage: Box<dyn QueueStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Appends a record stamped with the current time.
    ///
    /// No size bound is applied at write time; bounding happens on drain.
    /// Storage failures are logged and swallowed; a toast that cannot be
    /// persisted still gets its live broadcast from the publisher.
    pub fn enqueue(
        &self,
        message: impl Into<String>,
        severity: Severity,
        link: Option<String>,
        link_text: Option<String>,
    ) {
        let record = PendingToast {
            message: message.into(),
            severity,
            link,
            link_text,
            ts: self.clock.now_ms(),
        };

        let mut records = self.read_records();
        records.push(record);

        match serde_json::to_string(&records) {
            Ok(payload) => {
                if let Err(e) = self.storage.write(&payload) {
                    log::warn!("failed to persist pending toast: {}", e);
                }
            }
            Err(e) => log::warn!("failed to serialize pending toasts: {}", e),
        }
    }

    /// Reads and clears the queue, returning the replayable records.
    ///
    /// The read-then-clear is a single consumption: whatever this call
    /// returns is gone from storage, and a concurrent second drain sees an
    /// empty queue. Records are filtered to `now - ts <= window`,
    /// deduplicated by exact message keeping the first occurrence, capped
    /// at `max`, and returned newest-first.
    pub fn drain_recent(&self, window: Duration, max: usize) -> Vec<PendingToast> {
        let records = self.read_records();
        if let Err(e) = self.storage.clear() {
            log::warn!("failed to clear pending toast queue: {}", e);
        }

        let now = self.clock.now_ms();
        let window_ms = window.as_millis() as u64;

        let mut seen = std::collections::HashSet::new();
        let mut recent: Vec<PendingToast> = records
            .into_iter()
            .filter(|r| now.saturating_sub(r.ts) <= window_ms)
            .filter(|r| seen.insert(r.message.clone()))
            .take(max)
            .collect();
        recent.reverse();
        recent
    }

    /// Parses the stored payload, treating any failure as an empty queue.
    fn read_records(&self) -> Vec<PendingToast> {
        let payload = match self.storage.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("failed to read pending toast queue: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&payload).unwrap_or_else(|e| {
            log::warn!("discarding corrupt pending toast queue: {}", e);
            Vec::new()
        })
    }
}
