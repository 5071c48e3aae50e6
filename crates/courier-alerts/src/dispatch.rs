//! Broadcast dispatch of rendered digests.
//!
//! This module provides the capability traits the dispatcher consumes —
//! [`SubscriberDirectory`] for recipient listing and [`DeliveryChannel`]
//! for the outbound transport — plus the [`Broadcaster`] that fans a
//! digest out to every recipient with per-recipient failure isolation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Default bound on a single recipient delivery.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for listing broadcast recipients.
///
/// Implement this to plug in a subscriber store; the dispatcher calls it
/// once per broadcast and treats the result as read-only.
#[async_trait]
pub trait SubscriberDirectory: Send + Sync + fmt::Debug {
    /// Returns every recipient eligible for delivery.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::DirectoryUnavailable` if the recipient list
    /// cannot be produced.
    async fn list_recipients(&self) -> Result<Vec<String>>;
}

/// Trait for the outbound message transport.
///
/// Implement this to deliver digests over a concrete channel (chat
/// protocol, HTTP call, ...). The dispatcher attempts each recipient
/// independently and never retries here.
#[async_trait]
pub trait DeliveryChannel: Send + Sync + fmt::Debug {
    /// Returns the name of this channel.
    fn name(&self) -> &str;

    /// Delivers one message to one recipient.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::DeliveryFailed` if the message cannot be
    /// delivered.
    async fn deliver(&self, recipient: &str, text: &str) -> Result<()>;
}

/// Aggregate counts for one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Recipients the digest was delivered to.
    pub delivered: usize,
    /// Recipients whose delivery failed or timed out.
    pub failed: usize,
}

impl BroadcastOutcome {
    /// Returns the number of recipients attempted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Delivers a digest to every known recipient.
///
/// Recipients are attempted sequentially under a bounded per-recipient
/// timeout; a failure or timeout for one recipient is logged and counted
/// but never aborts delivery to the rest. Individual failures are not
/// surfaced beyond the aggregate counts.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    directory: Arc<dyn SubscriberDirectory>,
    channel: Arc<dyn DeliveryChannel>,
    delivery_timeout: Duration,
}

impl Broadcaster {
    /// Creates a broadcaster over the given directory and channel.
    #[must_use]
    pub fn new(directory: Arc<dyn SubscriberDirectory>, channel: Arc<dyn DeliveryChannel>) -> Self {
        Self {
            directory,
            channel,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    /// Sets the per-recipient delivery timeout.
    #[must_use]
    pub const fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Broadcasts a digest to every recipient.
    ///
    /// Listing recipients happens once per broadcast; if it fails the
    /// broadcast is abandoned with zero counts. The broadcast is considered
    /// complete regardless of individual delivery failures.
    pub async fn broadcast(&self, digest: &str) -> BroadcastOutcome {
        let recipients = match self.directory.list_recipients().await {
            Ok(recipients) => recipients,
            Err(e) => {
                warn!(error = %e, "broadcast abandoned, recipient listing failed");
                return BroadcastOutcome::default();
            }
        };

        info!(
            recipients = recipients.len(),
            channel = %self.channel.name(),
            "broadcasting digest"
        );

        let mut outcome = BroadcastOutcome::default();
        for recipient in &recipients {
            match tokio::time::timeout(
                self.delivery_timeout,
                self.channel.deliver(recipient, digest),
            )
            .await
            {
                Ok(Ok(())) => {
                    debug!(recipient = %recipient, "digest delivered");
                    outcome.delivered += 1;
                }
                Ok(Err(e)) => {
                    warn!(recipient = %recipient, error = %e, "digest delivery failed");
                    outcome.failed += 1;
                }
                Err(_) => {
                    warn!(
                        recipient = %recipient,
                        timeout_secs = self.delivery_timeout.as_secs(),
                        "digest delivery timed out"
                    );
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
}

/// A directory over a fixed recipient list.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    recipients: Vec<String>,
}

impl StaticDirectory {
    /// Creates a directory over the given recipients.
    #[must_use]
    pub fn new(recipients: Vec<String>) -> Self {
        Self { recipients }
    }
}

#[async_trait]
impl SubscriberDirectory for StaticDirectory {
    async fn list_recipients(&self) -> Result<Vec<String>> {
        Ok(self.recipients.clone())
    }
}

/// A channel that logs deliveries instead of transmitting them.
///
/// Useful for dry runs and as the default transport when no real channel
/// is wired up.
#[derive(Debug, Clone)]
pub struct LogDelivery {
    name: String,
}

impl LogDelivery {
    /// Creates a new log delivery channel.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogDelivery {
    fn default() -> Self {
        Self::new("log")
    }
}

#[async_trait]
impl DeliveryChannel for LogDelivery {
    fn name(&self) -> &str {
        &self.name
    }

    async fn deliver(&self, recipient: &str, text: &str) -> Result<()> {
        info!(
            channel = %self.name,
            recipient = %recipient,
            bytes = text.len(),
            "would deliver digest"
        );
        debug!(digest = %text, "digest body");
        Ok(())
    }
}
