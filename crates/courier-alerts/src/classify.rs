//! Severity classification of alert batches.

use serde::{Deserialize, Serialize};

use crate::types::{Alert, Severity};

/// A batch of alerts partitioned into ordered severity tiers.
///
/// The partition is exhaustive (every input alert lands in exactly one tier)
/// and order-preserving (within a tier, alerts keep their input order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAlerts {
    /// Critical-severity alerts, most urgent.
    pub critical: Vec<Alert>,
    /// Warning-severity alerts.
    pub warning: Vec<Alert>,
    /// Info-severity alerts, including all unknown severities.
    pub info: Vec<Alert>,
}

impl ClassifiedAlerts {
    /// Partitions a batch of alerts into severity tiers.
    #[must_use]
    pub fn classify(alerts: Vec<Alert>) -> Self {
        let mut classified = Self::default();
        for alert in alerts {
            match alert.severity() {
                Severity::Critical => classified.critical.push(alert),
                Severity::Warning => classified.warning.push(alert),
                Severity::Info => classified.info.push(alert),
            }
        }
        classified
    }

    /// Returns the total alert count across all tiers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.critical.len() + self.warning.len() + self.info.len()
    }

    /// Returns true if every tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Returns the tiers in rendering order, most urgent first.
    #[must_use]
    pub fn tiers(&self) -> [(Severity, &[Alert]); 3] {
        [
            (Severity::Critical, self.critical.as_slice()),
            (Severity::Warning, self.warning.as_slice()),
            (Severity::Info, self.info.as_slice()),
        ]
    }
}
