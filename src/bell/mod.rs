// SPDX-License-Identifier: MPL-2.0
//! Notification bell feed: the authoritative server-side notification list
//! and the per-item actions on it.
//!
//! The feed replaces its state wholesale on every successful fetch (full
//! replace, not a merge) and keeps last-known-good state on failure.
//! Background fetch failures are only logged; user-triggered actions that
//! fail always surface an error banner through the publisher.
//!
//! Mark-read is optimistic: the local flag flips even when the server call
//! fails, trading strict consistency for a responsive badge. The
//! divergence is logged and corrected by the next successful poll.

pub mod poller;

pub use poller::NotificationPoller;

use crate::api::{NotificationApi, NotificationItem};
use crate::bus::{AppEvent, EventBus};
use crate::publisher::{ToastOptions, ToastPublisher};
use std::sync::Arc;

/// Fallback contact link for rejection banners whose payload carries none.
const DEFAULT_CONTACT_LINK: &str = "/#contact";

/// Bell dropdown state and actions.
pub struct NotificationFeed {
    api: Arc<dyn NotificationApi>,
    publisher: ToastPublisher,
    bus: EventBus,
    items: Vec<NotificationItem>,
    open: bool,
    show_all: bool,
}

impl NotificationFeed {
    #[must_use]
    pub fn new(api: Arc<dyn NotificationApi>, publisher: ToastPublisher, bus: EventBus) -> Self {
        Self {
            api,
            publisher,
            bus,
            items: Vec::new(),
            open: false,
            show_all: false,
        }
    }

    /// Fetches the notification list and replaces local state.
    ///
    /// On failure the existing items are kept (stale-but-available) and the
    /// error is only logged; the next tick retries.
    pub async fn load_notifications(&mut self) {
        match self.api.list_notifications().await {
            Ok(items) => self.items = items,
            Err(e) => log::error!("failed to load notifications: {}", e),
        }
    }

    /// All fetched items, server order.
    #[must_use]
    pub fn items(&self) -> &[NotificationItem] {
        &self.items
    }

    /// Items for the dropdown: everything when `show_all`, otherwise only
    /// unread.
    pub fn visible_items(&self) -> impl Iterator<Item = &NotificationItem> {
        self.items
            .iter()
            .filter(move |n| self.show_all || !n.read)
    }

    /// Badge value: number of unread items.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Bell button toggle.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Outside-click close.
    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Switches the dropdown between unread-only and all items.
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    /// Acknowledges one notification.
    ///
    /// The local flag flips regardless of the API outcome; a failed call is
    /// logged, never surfaced as a banner (background-only failure).
    pub async fn mark_read(&mut self, id: i64) {
        if let Err(e) = self.api.mark_read(id).await {
            log::error!("failed to mark notification {} read: {}", id, e);
        }
        if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
            item.read = true;
        }
    }

    /// Patient confirms receipt of a shipped order.
    ///
    /// On success: the notification is acknowledged, the list reloaded, and
    /// a success toast published. On failure: an error toast carrying the
    /// server's message when it provided one.
    pub async fn handle_confirm_received(&mut self, order_id: i64, notification_id: i64) {
        match self.api.confirm_delivery(order_id).await {
            Ok(()) => {
                self.mark_read(notification_id).await;
                self.load_notifications().await;
                self.publisher
                    .success("Delivery confirmed", ToastOptions::default());
            }
            Err(e) => {
                log::error!("failed to confirm delivery for order {}: {}", order_id, e);
                self.publisher.error(
                    e.detail_or("Failed to confirm delivery"),
                    ToastOptions::default(),
                );
            }
        }
    }

    /// Patient accepts an approved order, with the same toast shape as
    /// delivery confirmation.
    pub async fn handle_accept_approval(&mut self, order_id: i64, notification_id: i64) {
        match self.api.accept_approval(order_id).await {
            Ok(()) => {
                self.mark_read(notification_id).await;
                self.load_notifications().await;
                self.publisher
                    .success("Order accepted", ToastOptions::default());
            }
            Err(e) => {
                log::error!("failed to accept order {}: {}", order_id, e);
                self.publisher
                    .error(e.detail_or("Failed to accept order"), ToastOptions::default());
            }
        }
    }

    /// Routes a click on a notification item.
    ///
    /// Rejections (or items carrying a contact URL) raise an
    /// error-with-link banner and are acknowledged; everything else
    /// broadcasts an open-orders request with any embedded order ID.
    /// Either way the dropdown closes.
    pub async fn handle_item_click(&mut self, id: i64) {
        let Some(item) = self.items.iter().find(|n| n.id == id).cloned() else {
            return;
        };

        if item.is_rejection() {
            let link = item
                .contact_url()
                .unwrap_or(DEFAULT_CONTACT_LINK)
                .to_string();
            self.publisher.error(
                item.message.clone(),
                ToastOptions::with_link(link, Some("Contact".to_string())),
            );
            self.mark_read(id).await;
        } else {
            self.bus.publish_app(AppEvent::OpenOrders {
                order_id: item.order_id(),
            });
        }
        self.open = false;
    }
}
