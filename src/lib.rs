// SPDX-License-Identifier: MPL-2.0
//! `pharmatrack-notify` is the client-side notification core of the
//! PharmaTrack dashboards.
//!
//! It carries toast messages across page navigations through a bounded,
//! deduplicating TTL queue, owns the visible banner set with tracked
//! auto-dismiss timers, and polls the PharmaTrack API for the unread
//! notification bell.
//!
//! # Components
//!
//! - [`queue`] - persisted Dedup/TTL queue for cross-navigation toasts
//! - [`publisher`] - `notify`/`success`/`error`/`info` call surface
//! - [`bus`] - injectable in-process pub/sub for toast and app events
//! - [`banner`] - banner store, timer arena, and async driver
//! - [`bell`] - server notification feed and its poll loop
//! - [`api`] - wire model and REST client
//! - [`config`] - named tunables ([`config::defaults`] holds the values)

#![doc(html_root_url = "https://docs.rs/pharmatrack-notify/0.1.0")]

pub mod api;
pub mod banner;
pub mod bell;
pub mod bus;
pub mod clock;
pub mod config;
pub mod error;
pub mod publisher;
pub mod queue;

pub use api::{HttpNotificationApi, NotificationApi, NotificationItem};
pub use banner::{BannerDriver, BannerEntry, BannerId, BannerStore};
pub use bell::{NotificationFeed, NotificationPoller};
pub use bus::{AppEvent, EventBus, Severity, ToastEvent};
pub use clock::{Clock, SystemClock};
pub use config::NotifyConfig;
pub use error::{Error, Result};
pub use publisher::{ToastOptions, ToastPublisher};
pub use queue::{PendingQueue, PendingToast};
