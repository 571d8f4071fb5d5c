// SPDX-License-Identifier: MPL-2.0
//! Banner data structures.

use crate::bus::{Severity, ToastEvent};
use crate::queue::PendingToast;

/// Default label for a banner's link affordance.
const DEFAULT_LINK_LABEL: &str = "Contact";

/// Unique identifier for one displayed banner instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(u64);

impl BannerId {
    /// Creates a new process-unique banner ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for BannerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A visible, time-limited, dismissible message box.
///
/// Presentation-only: a banner caused by a server notification carries no
/// reference back to the notification item beyond the text and link it was
/// constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerEntry {
    id: BannerId,
    message: String,
    severity: Severity,
    link: Option<String>,
    link_text: Option<String>,
}

impl BannerEntry {
    /// Builds a banner from a live toast event, assigning a fresh ID.
    #[must_use]
    pub fn from_event(event: &ToastEvent) -> Self {
        Self {
            id: BannerId::new(),
            message: event.message.clone(),
            severity: event.severity,
            link: event.link.clone(),
            link_text: event.link_text.clone(),
        }
    }

    /// Builds a banner from a replayed pending record, assigning a fresh ID.
    #[must_use]
    pub fn from_pending(record: &PendingToast) -> Self {
        Self {
            id: BannerId::new(),
            message: record.message.clone(),
            severity: record.severity,
            link: record.link.clone(),
            link_text: record.link_text.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> BannerId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Label for the link affordance; defaults to "Contact" when the event
    /// supplied none.
    #[must_use]
    pub fn link_label(&self) -> &str {
        self.link_text.as_deref().unwrap_or(DEFAULT_LINK_LABEL)
    }
}
