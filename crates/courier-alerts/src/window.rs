//! The aggregation window state machine.
//!
//! [`Aggregator`] debounces incoming alerts: the first alert after idle
//! arms a single window task, later alerts join the pending batch without
//! resetting the window, and when the window elapses the batch is drained,
//! classified, rendered, and broadcast in one shot.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info};

use crate::buffer::AlertBuffer;
use crate::classify::ClassifiedAlerts;
use crate::digest;
use crate::dispatch::Broadcaster;
use crate::types::Alert;

/// Default aggregation window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(30);

/// Debounced alert aggregator.
///
/// The aggregator is `Idle` until an alert arrives, then `Armed` for one
/// fixed window measured from that first alert. Arming is a compare-and-set
/// on an atomic flag, so concurrent ingestion creates exactly one window
/// task; losers of the race have already appended to the buffer the winner
/// will drain. Cloning shares the same buffer and state.
#[derive(Debug, Clone)]
pub struct Aggregator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    buffer: AlertBuffer,
    armed: AtomicBool,
    window: Duration,
    broadcaster: Broadcaster,
}

impl Aggregator {
    /// Creates an aggregator with the default 30 second window.
    #[must_use]
    pub fn new(broadcaster: Broadcaster) -> Self {
        Self {
            inner: Arc::new(Inner {
                buffer: AlertBuffer::new(),
                armed: AtomicBool::new(false),
                window: DEFAULT_WINDOW,
                broadcaster,
            }),
        }
    }

    /// Sets the aggregation window.
    ///
    /// Only meaningful before the first ingest; the window applies to every
    /// batch.
    #[must_use]
    pub fn with_window(self, window: Duration) -> Self {
        let inner = Inner {
            buffer: AlertBuffer::new(),
            armed: AtomicBool::new(false),
            window,
            broadcaster: self.inner.broadcaster.clone(),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the configured window duration.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Returns true if a window task is currently outstanding.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::SeqCst)
    }

    /// Returns the number of alerts awaiting the next drain.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.inner.buffer.len()
    }

    /// Buffers a batch of alerts and arms the window if idle.
    ///
    /// Returns true if this call armed a new window. An empty batch is a
    /// no-op and never arms. Must be called from within a tokio runtime.
    pub fn ingest(&self, alerts: Vec<Alert>) -> bool {
        if alerts.is_empty() {
            return false;
        }

        let count = alerts.len();
        self.inner.buffer.extend(alerts);

        // Append before the CAS: a caller that loses the arming race has
        // already handed its alerts to the winner's window.
        let armed_now = self
            .inner
            .armed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();

        if armed_now {
            debug!(alerts = count, window_secs = self.inner.window.as_secs(), "armed aggregation window");
            tokio::spawn(Self::run_window(Arc::clone(&self.inner)));
        } else {
            debug!(alerts = count, "window already armed, batch joins pending alerts");
        }

        armed_now
    }

    /// One armed window: sleep, disarm, drain, dispatch.
    async fn run_window(inner: Arc<Inner>) {
        tokio::time::sleep(inner.window).await;

        // Disarm before draining: an alert that arrives from here on arms
        // a fresh window instead of waiting behind an in-flight dispatch.
        inner.armed.store(false, Ordering::SeqCst);

        let batch = inner.buffer.drain_all();
        if batch.is_empty() {
            debug!("aggregation window elapsed with nothing pending");
            return;
        }

        let count = batch.len();
        let classified = ClassifiedAlerts::classify(batch);
        let rendered = digest::render(&classified);
        let outcome = inner.broadcaster.broadcast(&rendered).await;

        info!(
            alerts = count,
            delivered = outcome.delivered,
            failed = outcome.failed,
            "aggregation window dispatched"
        );
    }
}
