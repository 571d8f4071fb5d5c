// SPDX-License-Identifier: MPL-2.0
//! Banner store: owns the rendered set of banners and their timing.
//!
//! The store is deterministic and synchronous; the async [`driver`] feeds
//! it toast events and periodic ticks. Per banner the lifecycle is
//! created → visible → (timeout | manual dismiss) → removed, with both
//! removal paths converging on [`BannerStore::dismiss`]. Hovering does not
//! suspend a timer; there is no paused state.
//!
//! On every state change the store runs a self-healing pass: a visible
//! banner that somehow lost its timer is given one immediately, so no
//! banner can persist indefinitely.

pub mod driver;
mod entry;
mod timers;

pub use driver::BannerDriver;
pub use entry::{BannerEntry, BannerId};
pub use timers::TimerArena;

use crate::bus::ToastEvent;
use crate::clock::Clock;
use crate::config::NotifyConfig;
use crate::queue::PendingQueue;
use std::collections::VecDeque;
use std::sync::Arc;

/// Owns the visible banner list, the timer arena, and the stabilization
/// window.
pub struct BannerStore {
    config: NotifyConfig,
    clock: Arc<dyn Clock>,
    /// Visible banners, newest at the front.
    visible: VecDeque<BannerEntry>,
    timers: TimerArena,
    /// Live (non-persisted) events are dropped until this instant.
    stabilize_until: Option<u64>,
}

impl BannerStore {
    #[must_use]
    pub fn new(config: NotifyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            visible: VecDeque::new(),
            timers: TimerArena::new(),
            stabilize_until: None,
        }
    }

    /// Seeds the store from the pending queue and opens the stabilization
    /// window.
    ///
    /// The drain is the queue's single read-then-clear for this page load;
    /// replayed banners are capped at the visible limit and each gets an
    /// auto-dismiss timer. Until the stabilization window passes, live
    /// toast events without `persist` are ignored to avoid remount-race
    /// flicker.
    pub fn on_mount(&mut self, queue: &PendingQueue) {
        let now = self.clock.now_ms();
        let replayed = queue.drain_recent(self.config.recent_window, self.config.max_pending);

        // drain_recent returns newest-first; push_back preserves that order
        // with the newest at the front of the visible list.
        for record in &replayed {
            self.visible.push_back(BannerEntry::from_pending(record));
        }
        self.truncate_to_cap();

        self.stabilize_until = Some(now + self.config.stabilize.as_millis() as u64);
        self.heal();
    }

    /// Handles a broadcast toast event. Returns `true` when a banner was
    /// created.
    pub fn on_toast_event(&mut self, event: &ToastEvent) -> bool {
        if self.is_stabilizing() && !event.persist {
            log::debug!("ignored toast during stabilization: {}", event.message);
            return false;
        }

        let banner = BannerEntry::from_event(event);
        let id = banner.id();
        self.visible.push_front(banner);
        self.truncate_to_cap();
        self.schedule_dismiss(id);
        self.heal();
        true
    }

    /// Removes a banner and cancels its timer.
    ///
    /// Safe to call twice for the same ID (manual dismiss racing the
    /// timer); the second call is a no-op returning `false`.
    pub fn dismiss(&mut self, id: BannerId) -> bool {
        self.timers.cancel(id);
        let Some(pos) = self.visible.iter().position(|b| b.id() == id) else {
            return false;
        };
        self.visible.remove(pos);
        self.heal();
        true
    }

    /// Fires expired timers and runs the self-healing check.
    ///
    /// Called periodically by the driver; safe to call at any cadence.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        for id in self.timers.expired(now) {
            self.dismiss(id);
        }
        self.heal();
    }

    /// Whether the post-mount suppression window is still open.
    #[must_use]
    pub fn is_stabilizing(&self) -> bool {
        match self.stabilize_until {
            Some(until) => self.clock.now_ms() < until,
            None => false,
        }
    }

    /// Visible banners, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &BannerEntry> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Number of tracked timers. Always equals `visible_count` after any
    /// public operation.
    #[must_use]
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Test-only seam: registers a banner without scheduling its timer,
    /// simulating a missed scheduling path for the self-heal check.
    #[cfg(test)]
    fn inject_untimed(&mut self, banner: BannerEntry) {
        self.visible.push_front(banner);
    }

    fn schedule_dismiss(&mut self, id: BannerId) {
        let deadline = self.clock.now_ms() + self.config.banner_timeout.as_millis() as u64;
        self.timers.schedule(id, deadline);
    }

    /// Drops the oldest banners beyond the visible cap, cancelling their
    /// timers.
    fn truncate_to_cap(&mut self) {
        while self.visible.len() > self.config.max_visible {
            if let Some(evicted) = self.visible.pop_back() {
                self.timers.cancel(evicted.id());
            }
        }
    }

    /// Restores the one-timer-per-visible-banner invariant: schedules a
    /// timer for any banner missing one and drops timers whose banner is
    /// gone.
    fn heal(&mut self) {
        let untimed: Vec<BannerId> = self
            .visible
            .iter()
            .map(BannerEntry::id)
            .filter(|id| !self.timers.contains(*id))
            .collect();
        for id in untimed {
            log::debug!("scheduling missing auto-dismiss timer for banner {:?}", id);
            self.schedule_dismiss(id);
        }

        let live: std::collections::HashSet<BannerId> =
            self.visible.iter().map(BannerEntry::id).collect();
        self.timers.retain(|id| live.contains(&id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Severity;
    use crate::clock::ManualClock;
    use crate::queue::storage::MemoryStorage;
    use std::time::Duration;

    fn store_with_clock(clock: &ManualClock) -> BannerStore {
        BannerStore::new(NotifyConfig::default(), Arc::new(clock.clone()))
    }

    fn queue_with_clock(clock: &ManualClock) -> PendingQueue {
        PendingQueue::new(Box::new(MemoryStorage::new()), Arc::new(clock.clone()))
    }

    fn event(message: &str, severity: Severity) -> ToastEvent {
        ToastEvent {
            message: message.to_string(),
            severity,
            link: None,
            link_text: None,
            persist: false,
        }
    }

    fn mounted_store(clock: &ManualClock) -> BannerStore {
        let mut store = store_with_clock(clock);
        store.on_mount(&queue_with_clock(clock));
        // Step past the stabilization window so live events are accepted.
        clock.advance_ms(600);
        store
    }

    #[test]
    fn visible_count_never_exceeds_cap() {
        // Three most recent remain after more than three pushes.
        let clock = ManualClock::starting_at(0);
        let mut store = mounted_store(&clock);

        for i in 41..=44 {
            store.on_toast_event(&event(
                &format!("Order #{i} placed"),
                Severity::Success,
            ));
        }

        assert_eq!(store.visible_count(), 3);
        let messages: Vec<&str> = store.visible().map(BannerEntry::message).collect();
        assert_eq!(
            messages,
            vec![
                "Order #44 placed",
                "Order #43 placed",
                "Order #42 placed"
            ]
        );
    }

    #[test]
    fn eviction_cancels_the_evicted_timer() {
        let clock = ManualClock::starting_at(0);
        let mut store = mounted_store(&clock);

        for i in 0..4 {
            store.on_toast_event(&event(&format!("msg-{i}"), Severity::Info));
        }

        assert_eq!(store.visible_count(), 3);
        assert_eq!(store.timer_count(), 3);
    }

    #[test]
    fn dismiss_is_idempotent() {
        // Double dismissal results in exactly one removal.
        let clock = ManualClock::starting_at(0);
        let mut store = mounted_store(&clock);

        store.on_toast_event(&event("bye", Severity::Info));
        let id = store.visible().next().expect("banner present").id();

        assert!(store.dismiss(id));
        assert!(!store.dismiss(id));
        assert_eq!(store.visible_count(), 0);
        assert_eq!(store.timer_count(), 0);
    }

    #[test]
    fn timer_fires_through_dismiss_path() {
        let clock = ManualClock::starting_at(0);
        let mut store = mounted_store(&clock);

        store.on_toast_event(&event("transient", Severity::Success));
        assert_eq!(store.visible_count(), 1);

        clock.advance_ms(NotifyConfig::default().banner_timeout.as_millis() as u64 + 1);
        store.tick();

        assert_eq!(store.visible_count(), 0);
        assert_eq!(store.timer_count(), 0);
    }

    #[test]
    fn manual_dismiss_then_timer_fire_is_safe() {
        let clock = ManualClock::starting_at(0);
        let mut store = mounted_store(&clock);

        store.on_toast_event(&event("either way", Severity::Info));
        let id = store.visible().next().expect("banner present").id();

        assert!(store.dismiss(id));
        clock.advance_ms(10_000);
        store.tick();
        assert_eq!(store.visible_count(), 0);
    }

    #[test]
    fn untimed_banner_is_healed_on_next_tick() {
        // Fault injection: a banner without a timer gets one.
        let clock = ManualClock::starting_at(0);
        let mut store = mounted_store(&clock);

        store.inject_untimed(BannerEntry::from_event(&event("orphan", Severity::Info)));
        assert_eq!(store.timer_count(), 0);

        store.tick();
        assert_eq!(store.timer_count(), 1);

        // And the healed timer eventually dismisses the banner.
        clock.advance_ms(NotifyConfig::default().banner_timeout.as_millis() as u64 + 1);
        store.tick();
        assert_eq!(store.visible_count(), 0);
    }

    #[test]
    fn live_events_are_dropped_during_stabilization() {
        let clock = ManualClock::starting_at(0);
        let mut store = store_with_clock(&clock);
        store.on_mount(&queue_with_clock(&clock));

        assert!(store.is_stabilizing());
        assert!(!store.on_toast_event(&event("too early", Severity::Info)));
        assert_eq!(store.visible_count(), 0);

        clock.advance_ms(500);
        assert!(!store.is_stabilizing());
        assert!(store.on_toast_event(&event("settled", Severity::Info)));
        assert_eq!(store.visible_count(), 1);
    }

    #[test]
    fn persisted_events_bypass_stabilization() {
        let clock = ManualClock::starting_at(0);
        let mut store = store_with_clock(&clock);
        store.on_mount(&queue_with_clock(&clock));

        let mut evt = event("Login successful", Severity::Success);
        evt.persist = true;

        assert!(store.is_stabilizing());
        assert!(store.on_toast_event(&evt));
        assert_eq!(store.visible_count(), 1);
    }

    #[test]
    fn mount_seeds_from_queue_with_timers() {
        // A persisted toast replays exactly once.
        let clock = ManualClock::starting_at(100_000);
        let queue = queue_with_clock(&clock);
        queue.enqueue("Login successful", Severity::Success, None, None);

        // Simulated navigation: a fresh store mounts two seconds later.
        clock.advance_ms(2_000);
        let mut store = store_with_clock(&clock);
        store.on_mount(&queue);

        assert_eq!(store.visible_count(), 1);
        assert_eq!(store.timer_count(), 1);
        assert_eq!(
            store.visible().next().expect("banner").message(),
            "Login successful"
        );

        // The queue was consumed; a second mount sees nothing.
        let mut second = store_with_clock(&clock);
        second.on_mount(&queue);
        assert_eq!(second.visible_count(), 0);
    }

    #[test]
    fn mount_does_not_replay_expired_records() {
        // A 20s-old record is not shown.
        let clock = ManualClock::starting_at(1_000_000);
        let queue = queue_with_clock(&clock);
        queue.enqueue("stale login", Severity::Success, None, None);

        clock.advance_ms(20_000);
        let mut store = store_with_clock(&clock);
        store.on_mount(&queue);

        assert_eq!(store.visible_count(), 0);
    }

    #[test]
    fn mount_seeding_is_capped_at_visible_limit() {
        let clock = ManualClock::starting_at(0);
        let queue = queue_with_clock(&clock);
        for i in 0..5 {
            queue.enqueue(format!("pending-{i}"), Severity::Info, None, None);
            clock.advance_ms(1);
        }

        let mut store = store_with_clock(&clock);
        store.on_mount(&queue);

        assert_eq!(store.visible_count(), 3);
        assert_eq!(store.timer_count(), 3);
    }
}
