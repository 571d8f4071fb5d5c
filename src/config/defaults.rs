// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the notification core's tunables.
//!
//! This module is the single source of truth for the timing windows and
//! caps used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Replay**: how long a persisted toast stays eligible after navigation
//! - **Banner**: stabilization suppression and auto-dismiss timing
//! - **Caps**: visible banner and replayed record limits
//! - **Polling**: notification feed refresh cadence

// ==========================================================================
// Replay Defaults
// ==========================================================================

/// How long a persisted toast remains eligible for replay after it was
/// written (milliseconds). Records older than this are discarded on drain.
pub const DEFAULT_RECENT_WINDOW_MS: u64 = 15_000;

// ==========================================================================
// Banner Defaults
// ==========================================================================

/// Post-mount suppression window during which live (non-persisted) toast
/// events are dropped to avoid remount-race flicker (milliseconds).
pub const DEFAULT_STABILIZE_MS: u64 = 500;

/// How long a banner stays visible before auto-dismiss (milliseconds).
pub const DEFAULT_BANNER_TIMEOUT_MS: u64 = 6_000;

/// Cadence at which the banner driver checks auto-dismiss deadlines
/// (milliseconds).
pub const DEFAULT_TICK_MS: u64 = 100;

// ==========================================================================
// Cap Defaults
// ==========================================================================

/// Maximum number of banners visible at once.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Maximum number of persisted records replayed on a single mount.
pub const DEFAULT_MAX_PENDING: usize = 3;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Interval between notification list fetches (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_RECENT_WINDOW_MS > 0);
    assert!(DEFAULT_STABILIZE_MS > 0);
    assert!(DEFAULT_BANNER_TIMEOUT_MS > DEFAULT_STABILIZE_MS);
    assert!(DEFAULT_TICK_MS > 0);
    assert!(DEFAULT_TICK_MS < DEFAULT_BANNER_TIMEOUT_MS);
    assert!(DEFAULT_MAX_VISIBLE > 0);
    assert!(DEFAULT_MAX_PENDING > 0);
    assert!(DEFAULT_MAX_PENDING <= DEFAULT_MAX_VISIBLE);
    assert!(DEFAULT_POLL_INTERVAL_MS > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_window_matches_observed_value() {
        assert_eq!(DEFAULT_RECENT_WINDOW_MS, 15_000);
    }

    #[test]
    fn stabilization_is_shorter_than_banner_timeout() {
        assert!(DEFAULT_STABILIZE_MS < DEFAULT_BANNER_TIMEOUT_MS);
    }

    #[test]
    fn caps_are_three() {
        assert_eq!(DEFAULT_MAX_VISIBLE, 3);
        assert_eq!(DEFAULT_MAX_PENDING, 3);
    }

    #[test]
    fn poll_interval_is_ten_seconds() {
        assert_eq!(DEFAULT_POLL_INTERVAL_MS, 10_000);
    }
}
