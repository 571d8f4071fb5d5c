// SPDX-License-Identifier: MPL-2.0
//! Tunable parameters for the notification core.
//!
//! All timing windows and caps are carried by one [`NotifyConfig`] value
//! passed at construction, so nothing in the crate reads an inline literal.
//! Defaults live in [`defaults`].

pub mod defaults;

use std::time::Duration;

/// Configuration for the banner store, pending queue, and poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Replay eligibility window for persisted toasts.
    pub recent_window: Duration,
    /// Post-mount suppression window for live toast events.
    pub stabilize: Duration,
    /// Banner visible duration before auto-dismiss.
    pub banner_timeout: Duration,
    /// Cadence of the banner driver's deadline checks.
    pub tick: Duration,
    /// Maximum number of banners visible at once.
    pub max_visible: usize,
    /// Maximum number of persisted records replayed per mount.
    pub max_pending: usize,
    /// Interval between notification list fetches.
    pub poll_interval: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            recent_window: Duration::from_millis(defaults::DEFAULT_RECENT_WINDOW_MS),
            stabilize: Duration::from_millis(defaults::DEFAULT_STABILIZE_MS),
            banner_timeout: Duration::from_millis(defaults::DEFAULT_BANNER_TIMEOUT_MS),
            tick: Duration::from_millis(defaults::DEFAULT_TICK_MS),
            max_visible: defaults::DEFAULT_MAX_VISIBLE,
            max_pending: defaults::DEFAULT_MAX_PENDING,
            poll_interval: Duration::from_millis(defaults::DEFAULT_POLL_INTERVAL_MS),
        }
    }
}
