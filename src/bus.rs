// SPDX-License-Identifier: MPL-2.0
//! In-process event bus.
//!
//! An explicit publish/subscribe object built on
//! [`tokio::sync::broadcast`], injected wherever events are raised or
//! consumed instead of living in ambient global state, so the banner store
//! and publisher can be tested in isolation.
//!
//! Two channels are carried: toast events for the banner store, and app
//! events (currently "open the related orders view") for outer collaborators.
//! Publishing never blocks and never fails the caller; with no live
//! subscriber the send reports undelivered and the caller decides what to
//! do (the publisher falls back to its last-resort sink).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default broadcast channel capacity. Events are tiny and consumed
/// promptly; a lagged receiver just skips ahead.
const CHANNEL_CAPACITY: usize = 64;

/// Visual severity of a toast, matching the wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

impl Severity {
    /// Prefix used by the last-resort fallback sink.
    #[must_use]
    pub fn fallback_prefix(&self) -> &'static str {
        match self {
            Severity::Success => "Success: ",
            Severity::Error => "Error: ",
            Severity::Info => "",
        }
    }
}

/// A toast request broadcast to whichever banner store is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEvent {
    pub message: String,
    pub severity: Severity,
    pub link: Option<String>,
    pub link_text: Option<String>,
    /// Set when the request was also written to the pending queue. The
    /// banner store lets persisted events through the stabilization window.
    pub persist: bool,
}

/// Cross-page requests consumed by collaborators outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Open the orders view, optionally focused on one order.
    OpenOrders { order_id: Option<i64> },
}

/// Clonable handle to both broadcast channels.
#[derive(Debug, Clone)]
pub struct EventBus {
    toasts: broadcast::Sender<ToastEvent>,
    app: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Creates a bus with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        let (toasts, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (app, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { toasts, app }
    }

    /// Broadcasts a toast event. Returns `true` if at least one subscriber
    /// received it.
    pub fn publish_toast(&self, event: ToastEvent) -> bool {
        self.toasts.send(event).is_ok()
    }

    /// Subscribes to toast events.
    #[must_use]
    pub fn subscribe_toasts(&self) -> broadcast::Receiver<ToastEvent> {
        self.toasts.subscribe()
    }

    /// Broadcasts an app event. Returns `true` if at least one subscriber
    /// received it.
    pub fn publish_app(&self, event: AppEvent) -> bool {
        self.app.send(event).is_ok()
    }

    /// Subscribes to app events.
    #[must_use]
    pub fn subscribe_app(&self) -> broadcast::Receiver<AppEvent> {
        self.app.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(message: &str) -> ToastEvent {
        ToastEvent {
            message: message.to_string(),
            severity: Severity::Info,
            link: None,
            link_text: None,
            persist: false,
        }
    }

    #[test]
    fn publish_without_subscriber_reports_undelivered() {
        let bus = EventBus::new();
        assert!(!bus.publish_toast(event("nobody listening")));
    }

    #[tokio::test]
    async fn subscriber_receives_published_toast() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe_toasts();

        assert!(bus.publish_toast(event("hello")));
        let received = rx.recv().await.expect("receive toast");
        assert_eq!(received.message, "hello");
    }

    #[tokio::test]
    async fn app_events_are_independent_of_toasts() {
        let bus = EventBus::new();
        let mut app_rx = bus.subscribe_app();

        // A toast subscriber does not make app publishing delivered.
        let _toast_rx = bus.subscribe_toasts();
        assert!(bus.publish_app(AppEvent::OpenOrders { order_id: Some(7) }));

        match app_rx.recv().await.expect("receive app event") {
            AppEvent::OpenOrders { order_id } => assert_eq!(order_id, Some(7)),
        }
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Success).expect("serialize"),
            "\"success\""
        );
        let parsed: Severity = serde_json::from_str("\"error\"").expect("deserialize");
        assert_eq!(parsed, Severity::Error);
    }

    #[test]
    fn fallback_prefixes_match_severity() {
        assert_eq!(Severity::Success.fallback_prefix(), "Success: ");
        assert_eq!(Severity::Error.fallback_prefix(), "Error: ");
        assert_eq!(Severity::Info.fallback_prefix(), "");
    }
}
