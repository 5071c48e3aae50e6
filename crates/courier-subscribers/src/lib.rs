//! Subscriber directory for Courier broadcasts.
//!
//! [`SubscriberStore`] keeps the set of recipients a digest is delivered
//! to. It starts from a seeded list (typically supplied by configuration)
//! and overlays any recipients previously persisted to a JSON snapshot
//! file; additions and removals rewrite the snapshot. The store implements
//! [`SubscriberDirectory`] so it can be injected straight into the
//! broadcast dispatcher.
//!
//! A missing or unreadable snapshot is not fatal: the store logs a warning
//! and continues with the seeded set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use courier_alerts::SubscriberDirectory;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur in the subscriber store.
#[derive(Debug, Error)]
pub enum SubscriberError {
    /// Snapshot file could not be read or written.
    #[error("subscriber storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file contents could not be parsed.
    #[error("subscriber storage parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for subscriber store operations.
pub type Result<T> = std::result::Result<T, SubscriberError>;

/// The set of broadcast recipients, optionally backed by a JSON snapshot.
#[derive(Debug)]
pub struct SubscriberStore {
    recipients: RwLock<BTreeSet<String>>,
    storage_path: Option<PathBuf>,
}

impl SubscriberStore {
    /// Creates an in-memory store from a seeded recipient list.
    #[must_use]
    pub fn new(seed: Vec<String>) -> Self {
        Self {
            recipients: RwLock::new(seed.into_iter().collect()),
            storage_path: None,
        }
    }

    /// Creates a store that overlays a JSON snapshot on the seeded list.
    ///
    /// Recipients found in the snapshot are merged with the seed. A missing
    /// or malformed snapshot is logged and ignored; mutations will still
    /// persist to the given path.
    #[must_use]
    pub fn with_storage(seed: Vec<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut recipients: BTreeSet<String> = seed.into_iter().collect();

        match Self::load_snapshot(&path) {
            Ok(Some(stored)) => {
                debug!(count = stored.len(), path = %path.display(), "loaded subscribers from snapshot");
                recipients.extend(stored);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load subscriber snapshot, using seed only");
            }
        }

        Self {
            recipients: RwLock::new(recipients),
            storage_path: Some(path),
        }
    }

    fn load_snapshot(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let stored: Vec<String> = serde_json::from_str(&contents)?;
        Ok(Some(stored))
    }

    /// Adds a recipient.
    ///
    /// Returns true if the recipient was newly added; an existing recipient
    /// is a no-op and does not rewrite the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add(&self, recipient: impl Into<String>) -> Result<bool> {
        let recipient = recipient.into();
        {
            let mut recipients = self.recipients.write();
            if !recipients.insert(recipient.clone()) {
                return Ok(false);
            }
        }
        info!(recipient = %recipient, "added subscriber");
        self.snapshot()?;
        Ok(true)
    }

    /// Removes a recipient.
    ///
    /// Returns true if the recipient was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn remove(&self, recipient: &str) -> Result<bool> {
        {
            let mut recipients = self.recipients.write();
            if !recipients.remove(recipient) {
                return Ok(false);
            }
        }
        info!(recipient = %recipient, "removed subscriber");
        self.snapshot()?;
        Ok(true)
    }

    /// Returns true if the recipient is subscribed.
    #[must_use]
    pub fn contains(&self, recipient: &str) -> bool {
        self.recipients.read().contains(recipient)
    }

    /// Returns every subscribed recipient, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.recipients.read().iter().cloned().collect()
    }

    /// Returns the number of subscribed recipients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipients.read().len()
    }

    /// Returns true if no recipients are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.read().is_empty()
    }

    /// Writes the current recipient set to the snapshot file, if configured.
    fn snapshot(&self) -> Result<()> {
        let Some(path) = &self.storage_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let recipients = self.list();
        let json = serde_json::to_string_pretty(&recipients)?;
        fs::write(path, json)?;
        debug!(count = recipients.len(), path = %path.display(), "wrote subscriber snapshot");
        Ok(())
    }
}

#[async_trait]
impl SubscriberDirectory for SubscriberStore {
    async fn list_recipients(&self) -> courier_alerts::Result<Vec<String>> {
        Ok(self.list())
    }
}
