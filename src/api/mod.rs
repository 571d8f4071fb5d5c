// SPDX-License-Identifier: MPL-2.0
//! Wire model and client trait for the PharmaTrack notification API.
//!
//! Notification items are server-owned: the client only refreshes them by
//! polling and flips `read` from false to true; nothing is deleted locally.
//! The [`NotificationApi`] trait is the seam between the bell feed and the
//! HTTP client so tests can substitute a scripted implementation.

pub mod http;

pub use http::HttpNotificationApi;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verb tag carried by order-rejection notifications.
pub const VERB_ORDER_REJECTED: &str = "order_rejected";

/// Verb tag carried by shipment notifications, which offer the patient a
/// "confirm received" action.
pub const VERB_ORDER_SHIPPED: &str = "order_shipped";

/// A server-owned notification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: i64,
    /// Category tag, e.g. `order_shipped`, `order_rejected`.
    pub verb: String,
    pub message: String,
    /// Opaque payload; orders embed `order_id`, rejections may embed
    /// `contact_url`.
    #[serde(default)]
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationItem {
    /// Order ID embedded in the payload, if any.
    #[must_use]
    pub fn order_id(&self) -> Option<i64> {
        self.data.get("order_id").and_then(serde_json::Value::as_i64)
    }

    /// Contact URL embedded in the payload, if any.
    #[must_use]
    pub fn contact_url(&self) -> Option<&str> {
        self.data.get("contact_url").and_then(serde_json::Value::as_str)
    }

    /// Whether clicking this item should surface a contact-link error
    /// banner instead of opening the orders view.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.verb == VERB_ORDER_REJECTED || self.contact_url().is_some()
    }
}

/// Remote operations consumed by the bell feed.
///
/// All calls are non-blocking; failures are returned, never panicked, and
/// the feed decides whether they surface as banners or only as log lines.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetches the full notification list for the current user.
    async fn list_notifications(&self) -> Result<Vec<NotificationItem>>;

    /// Acknowledges a single notification.
    async fn mark_read(&self, id: i64) -> Result<()>;

    /// Patient confirms receipt of a shipped order.
    async fn confirm_delivery(&self, order_id: i64) -> Result<()>;

    /// Patient accepts an approved order.
    async fn accept_approval(&self, order_id: i64) -> Result<()>;
}
