// SPDX-License-Identifier: MPL-2.0
//! Storage backends for the pending toast queue.
//!
//! The queue only needs three primitives on an opaque string payload:
//! read, write, clear. Production uses a small JSON file under the
//! platform data directory (the navigation-survival analogue of session
//! storage); tests use the in-memory backend.

use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// File name within the app data directory.
const QUEUE_FILE: &str = "pending_toasts.json";

/// Directory name under the platform data dir.
const APP_DIR: &str = "PharmaTrack";

/// Raw payload storage for the pending queue.
pub trait QueueStorage: Send + Sync {
    /// Returns the stored payload, or `None` when nothing is stored.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored payload.
    fn write(&self, payload: &str) -> Result<()>;

    /// Removes the stored payload. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;
}

impl<S: QueueStorage + ?Sized> QueueStorage for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<()> {
        (**self).write(payload)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// In-memory backend for tests and non-persistent contexts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cell: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        let cell = self
            .cell
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(cell.clone())
    }

    fn write(&self, payload: &str) -> Result<()> {
        let mut cell = self
            .cell
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        *cell = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut cell = self
            .cell
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        *cell = None;
        Ok(())
    }
}

/// File-backed storage under the platform data directory.
///
/// The payload survives full navigations/restarts of the client process;
/// the TTL window in the queue keeps stale records from replaying later.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage at the default platform location
    /// (`<data_dir>/PharmaTrack/pending_toasts.json`).
    ///
    /// Returns `None` when no platform data directory can be resolved.
    #[must_use]
    pub fn new() -> Option<Self> {
        dirs::data_dir().map(|mut path| {
            path.push(APP_DIR);
            path.push(QUEUE_FILE);
            Self { path }
        })
    }

    /// Creates storage at an explicit path (used by tests and portable
    /// deployments).
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl QueueStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
