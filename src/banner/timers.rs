// SPDX-License-Identifier: MPL-2.0
//! Tracked auto-dismiss timers.
//!
//! One map from banner ID to deadline replaces scattered ad hoc timers, so
//! the "every visible banner has exactly one live timer" invariant can be
//! checked mechanically. Firing is driven by the store's periodic tick
//! against the injected clock rather than by per-banner tasks.

use super::entry::BannerId;
use std::collections::HashMap;

/// Map from banner ID to auto-dismiss deadline (Unix milliseconds).
#[derive(Debug, Default)]
pub struct TimerArena {
    deadlines: HashMap<BannerId, u64>,
}

impl TimerArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules (or reschedules) the deadline for a banner.
    pub fn schedule(&mut self, id: BannerId, deadline_ms: u64) {
        self.deadlines.insert(id, deadline_ms);
    }

    /// Cancels the timer for a banner.
    ///
    /// Returns `true` if a timer existed. Cancelling twice is a no-op.
    pub fn cancel(&mut self, id: BannerId) -> bool {
        self.deadlines.remove(&id).is_some()
    }

    /// Whether a banner has a tracked timer.
    #[must_use]
    pub fn contains(&self, id: BannerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// IDs whose deadline has passed at `now_ms`.
    #[must_use]
    pub fn expired(&self, now_ms: u64) -> Vec<BannerId> {
        self.deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now_ms)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drops timers whose banner is no longer tracked by the caller.
    pub fn retain(&mut self, keep: impl Fn(BannerId) -> bool) {
        self.deadlines.retain(|id, _| keep(*id));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
