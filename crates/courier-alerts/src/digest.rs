//! Digest rendering.
//!
//! Turns a classified batch into a single human-readable text block:
//! a title line, one section per non-empty severity tier (most urgent
//! first), a total count, and the formatting timestamp. Tiers with no
//! alerts are omitted entirely.

use chrono::{DateTime, Utc};

use crate::classify::ClassifiedAlerts;
use crate::types::{Alert, Severity};

/// Renders a classified batch into a digest, timestamped now.
#[must_use]
pub fn render(classified: &ClassifiedAlerts) -> String {
    render_at(classified, Utc::now())
}

/// Renders a classified batch into a digest with an explicit timestamp.
#[must_use]
pub fn render_at(classified: &ClassifiedAlerts, rendered_at: DateTime<Utc>) -> String {
    let mut lines = vec!["🚨 *Alert Notification*\n".to_string()];

    for (severity, alerts) in classified.tiers() {
        if alerts.is_empty() {
            continue;
        }
        lines.push(tier_header(severity).to_string());
        for alert in alerts {
            lines.push(render_alert(alert));
        }
        lines.push(String::new());
    }

    lines.push(format!("📊 Total: {} alert(s)", classified.total()));
    lines.push(format!("🕐 {}", rendered_at.format("%Y-%m-%d %H:%M:%S")));

    lines.join("\n")
}

const fn tier_header(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴 *CRITICAL ALERTS*",
        Severity::Warning => "🟡 *WARNING ALERTS*",
        Severity::Info => "🔵 *INFO ALERTS*",
    }
}

fn render_alert(alert: &Alert) -> String {
    let marker = if alert.status.is_resolved() { "🟢" } else { "🔴" };
    format!(
        "{marker} *{name}* [{status}]\n   Instance: `{instance}`\n   {summary}",
        name = alert.name(),
        status = alert.status.as_word(),
        instance = alert.instance(),
        summary = alert.summary(),
    )
}
