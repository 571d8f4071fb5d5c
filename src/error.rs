// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors raised by the notification core.
///
/// Transport and storage failures are recoverable: callers either
/// retry on the next poll tick or fall back to an empty pending queue. Only
/// user-triggered actions surface errors, and then as banners rather than
/// panics.
#[derive(Debug, Clone)]
pub enum Error {
    /// Persisted queue backend failure (missing data directory, unreadable
    /// file, quota-style write failures).
    Storage(String),

    /// Network-level failure talking to the PharmaTrack API.
    Transport(String),

    /// The API answered with a non-success status. `detail` carries the
    /// server's human-readable message when the body provided one.
    Api { status: u16, detail: Option<String> },
}

impl Error {
    /// Returns the most specific message available for user display.
    ///
    /// API errors prefer the server-provided `detail`; everything else falls
    /// back to the supplied generic string.
    #[must_use]
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            Error::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Storage(e) => write!(f, "Storage error: {}", e),
            Error::Transport(e) => write!(f, "Transport error: {}", e),
            Error::Api { status, detail } => match detail {
                Some(detail) => write!(f, "API error ({}): {}", status, detail),
                None => write!(f, "API error ({})", status),
            },
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
