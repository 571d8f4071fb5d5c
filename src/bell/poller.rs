// SPDX-License-Identifier: MPL-2.0
//! Polling driver for the notification feed.
//!
//! Triple-trigger policy: one fetch immediately on spawn, one per fixed
//! interval, and one whenever [`NotificationPoller::refresh`] is called
//! (the page-became-visible analogue). In-flight requests are not
//! cancelled; a stale response is simply overwritten by the next fetch
//! (last-write-wins). The task is aborted on shutdown or drop so it never
//! mutates a feed whose page is gone.

use super::NotificationFeed;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to the running poll loop.
#[derive(Debug)]
pub struct NotificationPoller {
    task: JoinHandle<()>,
    refresh: Arc<Notify>,
}

impl NotificationPoller {
    /// Spawns the poll loop. The first fetch happens immediately.
    pub fn spawn(feed: Arc<Mutex<NotificationFeed>>, interval: Duration) -> Self {
        let refresh = Arc::new(Notify::new());
        let trigger = refresh.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = trigger.notified() => {}
                }
                feed.lock().await.load_notifications().await;
            }
        });

        Self { task, refresh }
    }

    /// Requests an out-of-band fetch (e.g. the page regained visibility).
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stops the poll loop.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NotificationApi, NotificationItem};
    use crate::bus::EventBus;
    use crate::clock::ManualClock;
    use crate::error::Result;
    use crate::publisher::ToastPublisher;
    use crate::queue::storage::MemoryStorage;
    use crate::queue::PendingQueue;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts list calls; always returns an empty feed.
    #[derive(Default)]
    struct CountingApi {
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl NotificationApi for CountingApi {
        async fn list_notifications(&self) -> Result<Vec<NotificationItem>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn mark_read(&self, _id: i64) -> Result<()> {
            Ok(())
        }

        async fn confirm_delivery(&self, _order_id: i64) -> Result<()> {
            Ok(())
        }

        async fn accept_approval(&self, _order_id: i64) -> Result<()> {
            Ok(())
        }
    }

    fn feed_over(api: Arc<CountingApi>) -> Arc<Mutex<NotificationFeed>> {
        let bus = EventBus::new();
        let queue = Arc::new(PendingQueue::new(
            Box::new(MemoryStorage::new()),
            Arc::new(ManualClock::default()),
        ));
        let publisher = ToastPublisher::new(bus.clone(), queue);
        Arc::new(Mutex::new(NotificationFeed::new(api, publisher, bus)))
    }

    async fn wait_for_calls(api: &CountingApi, at_least: usize) {
        for _ in 0..100 {
            if api.list_calls.load(Ordering::SeqCst) >= at_least {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected at least {} list calls, saw {}",
            at_least,
            api.list_calls.load(Ordering::SeqCst)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn first_fetch_happens_immediately() {
        let api = Arc::new(CountingApi::default());
        let poller = NotificationPoller::spawn(feed_over(api.clone()), Duration::from_secs(60));

        wait_for_calls(&api, 1).await;
        poller.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refresh_triggers_out_of_band_fetch() {
        let api = Arc::new(CountingApi::default());
        let poller = NotificationPoller::spawn(feed_over(api.clone()), Duration::from_secs(60));

        wait_for_calls(&api, 1).await;
        poller.refresh();
        wait_for_calls(&api, 2).await;
        poller.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn interval_drives_repeated_fetches() {
        let api = Arc::new(CountingApi::default());
        let poller = NotificationPoller::spawn(feed_over(api.clone()), Duration::from_millis(20));

        wait_for_calls(&api, 3).await;
        poller.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn shutdown_stops_polling() {
        let api = Arc::new(CountingApi::default());
        let poller = NotificationPoller::spawn(feed_over(api.clone()), Duration::from_millis(20));

        wait_for_calls(&api, 1).await;
        poller.shutdown();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let settled = api.list_calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(api.list_calls.load(Ordering::SeqCst), settled);
    }
}
