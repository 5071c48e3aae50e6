//! The pending-alert buffer.
//!
//! [`AlertBuffer`] holds alerts received since the last drain. Appends never
//! fail and never block beyond the lock; [`AlertBuffer::drain_all`] removes
//! and returns the whole pending batch atomically, so an append racing a
//! drain lands either in the returned batch or in the next one.

use parking_lot::Mutex;

use crate::types::Alert;

/// An append-only queue of alerts awaiting aggregation.
///
/// The buffer is safe to share across tasks; the lock is held only for the
/// duration of the mutation, never across await points.
#[derive(Debug, Default)]
pub struct AlertBuffer {
    pending: Mutex<Vec<Alert>>,
}

impl AlertBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one alert to the pending batch.
    pub fn append(&self, alert: Alert) {
        self.pending.lock().push(alert);
    }

    /// Appends a batch of alerts to the pending batch.
    pub fn extend(&self, alerts: impl IntoIterator<Item = Alert>) {
        self.pending.lock().extend(alerts);
    }

    /// Atomically removes and returns every pending alert.
    ///
    /// The buffer is empty immediately afterwards.
    #[must_use]
    pub fn drain_all(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Returns the number of pending alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns true if no alerts are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named_alert(name: &str) -> Alert {
        let mut alert = Alert::default();
        alert
            .labels
            .insert("alertname".to_string(), name.to_string());
        alert
    }

    #[test]
    fn append_then_drain() {
        let buffer = AlertBuffer::new();
        buffer.append(named_alert("A"));
        buffer.append(named_alert("B"));

        let drained = buffer.drain_all();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].name(), "A");
        assert_eq!(drained[1].name(), "B");
        assert!(buffer.is_empty());
    }

    #[test]
    fn drain_empty_buffer() {
        let buffer = AlertBuffer::new();
        assert!(buffer.drain_all().is_empty());
    }

    #[test]
    fn second_drain_is_empty() {
        let buffer = AlertBuffer::new();
        buffer.append(named_alert("A"));

        assert_eq!(buffer.drain_all().len(), 1);
        assert!(buffer.drain_all().is_empty());
    }

    #[test]
    fn extend_appends_in_order() {
        let buffer = AlertBuffer::new();
        buffer.extend(vec![named_alert("A"), named_alert("B"), named_alert("C")]);

        assert_eq!(buffer.len(), 3);
        let drained = buffer.drain_all();
        assert_eq!(drained[2].name(), "C");
    }

    #[test]
    fn appends_after_drain_land_in_next_batch() {
        let buffer = AlertBuffer::new();
        buffer.append(named_alert("first"));
        let first = buffer.drain_all();
        buffer.append(named_alert("second"));
        let second = buffer.drain_all();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name(), "second");
    }

    proptest! {
        #[test]
        fn drain_returns_every_append_exactly_once(names in proptest::collection::vec("[a-z]{1,8}", 0..32)) {
            let buffer = AlertBuffer::new();
            for name in &names {
                buffer.append(named_alert(name));
            }

            let drained = buffer.drain_all();
            prop_assert_eq!(drained.len(), names.len());
            for (alert, name) in drained.iter().zip(&names) {
                prop_assert_eq!(alert.name(), name.as_str());
            }
            prop_assert!(buffer.is_empty());
        }
    }
}
