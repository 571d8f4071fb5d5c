// SPDX-License-Identifier: MPL-2.0
//! Uniform call surface for raising a toast from anywhere in the app.
//!
//! `notify` always broadcasts a live [`ToastEvent`]; with `persist` set it
//! first writes the request into the pending queue so it survives a full
//! navigation. When nothing is subscribed (headless context, store not
//! mounted yet) the event goes to a last-resort sink instead of being
//! dropped.

use crate::bus::{EventBus, Severity, ToastEvent};
use crate::queue::PendingQueue;
use std::sync::Arc;

/// Options accepted by [`ToastPublisher::notify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastOptions {
    pub link: Option<String>,
    pub link_text: Option<String>,
    /// Also write the toast into the pending queue for replay after a
    /// navigation.
    pub persist: bool,
}

impl ToastOptions {
    /// Options for a toast that should survive the next navigation.
    #[must_use]
    pub fn persisted() -> Self {
        Self {
            persist: true,
            ..Self::default()
        }
    }

    /// Options carrying a contact-style link.
    #[must_use]
    pub fn with_link(link: impl Into<String>, link_text: Option<String>) -> Self {
        Self {
            link: Some(link.into()),
            link_text,
            persist: false,
        }
    }
}

/// Sink invoked when a toast cannot be delivered to any subscriber.
/// Implementations must not panic.
pub type FallbackSink = Box<dyn Fn(&ToastEvent) + Send + Sync>;

/// Thin publisher over the event bus and pending queue.
#[derive(Clone)]
pub struct ToastPublisher {
    bus: EventBus,
    queue: Arc<PendingQueue>,
    fallback: Arc<FallbackSink>,
}

impl ToastPublisher {
    /// Creates a publisher whose fallback writes a prefixed line to stderr.
    #[must_use]
    pub fn new(bus: EventBus, queue: Arc<PendingQueue>) -> Self {
        Self::with_fallback(
            bus,
            queue,
            Box::new(|event| {
                eprintln!("{}{}", event.severity.fallback_prefix(), event.message);
            }),
        )
    }

    /// Creates a publisher with a custom last-resort sink.
    #[must_use]
    pub fn with_fallback(bus: EventBus, queue: Arc<PendingQueue>, fallback: FallbackSink) -> Self {
        Self {
            bus,
            queue,
            fallback: Arc::new(fallback),
        }
    }

    /// Raises a toast.
    ///
    /// Persisted requests are enqueued before the broadcast so a navigation
    /// racing the event cannot lose the message. Never panics and never
    /// returns an error; undeliverable events go to the fallback sink.
    pub fn notify(&self, message: impl Into<String>, severity: Severity, options: ToastOptions) {
        let message = message.into();

        if options.persist {
            self.queue.enqueue(
                message.clone(),
                severity,
                options.link.clone(),
                options.link_text.clone(),
            );
        }

        let event = ToastEvent {
            message,
            severity,
            link: options.link,
            link_text: options.link_text,
            persist: options.persist,
        };

        if !self.bus.publish_toast(event.clone()) {
            log::debug!("no toast subscriber; using fallback for: {}", event.message);
            (self.fallback)(&event);
        }
    }

    /// Raises a success toast.
    pub fn success(&self, message: impl Into<String>, options: ToastOptions) {
        self.notify(message, Severity::Success, options);
    }

    /// Raises an error toast.
    pub fn error(&self, message: impl Into<String>, options: ToastOptions) {
        self.notify(message, Severity::Error, options);
    }

    /// Raises an info toast.
    pub fn info(&self, message: impl Into<String>, options: ToastOptions) {
        self.notify(message, Severity::Info, options);
    }
}
