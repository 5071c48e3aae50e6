//! End-to-end ingestion scenarios driven through the HTTP router.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use courier_alerts::{Aggregator, Broadcaster, DeliveryChannel, StaticDirectory};
use courier_server::{CourierConfig, CourierServer};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

/// Records every delivery; fails for recipients in the deny list.
#[derive(Debug, Default)]
struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
    deny: Vec<String>,
}

impl RecordingChannel {
    fn denying(deny: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            deny: deny.iter().map(ToString::to_string).collect(),
        }
    }

    fn deliveries(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, recipient: &str, text: &str) -> courier_alerts::Result<()> {
        if self.deny.iter().any(|d| d == recipient) {
            return Err(courier_alerts::AlertError::DeliveryFailed {
                recipient: recipient.to_string(),
                reason: "denied by test".to_string(),
            });
        }
        self.sent
            .lock()
            .push((recipient.to_string(), text.to_string()));
        Ok(())
    }
}

fn make_server(recipients: &[&str]) -> (CourierServer, Arc<RecordingChannel>) {
    make_server_with_channel(recipients, RecordingChannel::default())
}

fn make_server_with_channel(
    recipients: &[&str],
    channel: RecordingChannel,
) -> (CourierServer, Arc<RecordingChannel>) {
    let channel = Arc::new(channel);
    let directory = Arc::new(StaticDirectory::new(
        recipients.iter().map(ToString::to_string).collect(),
    ));
    let broadcaster = Broadcaster::new(directory, channel.clone());
    let aggregator = Aggregator::new(broadcaster).with_window(Duration::from_secs(30));

    let server = CourierServer::new(CourierConfig::default(), aggregator);
    (server, channel)
}

async fn post_alerts(router: Router, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/alerts")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Let the spawned window task make progress after the clock advances.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn single_alert_flows_through_to_broadcast() {
    let (server, channel) = make_server(&["ops-room"]);

    let (status, body) = post_alerts(
        server.router(),
        r#"{"alerts":[{"labels":{"severity":"critical","alertname":"DiskFull","instance":"host1"},"annotations":{"summary":"Disk >95%"},"status":"firing"}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert!(server.aggregator().is_armed());

    tokio::time::sleep(Duration::from_secs(31)).await;
    settle().await;

    let deliveries = channel.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].0, "ops-room");

    let digest = &deliveries[0].1;
    assert!(digest.contains("DiskFull"));
    assert!(digest.contains("FIRING"));
    assert!(digest.contains("host1"));
    assert!(digest.contains("Disk >95%"));
    assert!(digest.contains("Total: 1 alert(s)"));
}

#[tokio::test(start_paused = true)]
async fn empty_alerts_array_is_accepted_but_arms_nothing() {
    let (server, channel) = make_server(&["ops-room"]);

    let (status, body) = post_alerts(server.router(), r#"{"alerts": []}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert!(!server.aggregator().is_armed());

    tokio::time::sleep(Duration::from_secs(60)).await;
    settle().await;

    assert!(channel.deliveries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn missing_alerts_key_is_an_empty_batch() {
    let (server, channel) = make_server(&["ops-room"]);

    let (status, _) = post_alerts(server.router(), "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!server.aggregator().is_armed());

    tokio::time::sleep(Duration::from_secs(60)).await;
    settle().await;
    assert!(channel.deliveries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn two_calls_within_one_window_share_one_digest() {
    let (server, channel) = make_server(&["ops-room"]);

    let (status, _) = post_alerts(
        server.router(),
        r#"{"alerts":[{"labels":{"severity":"warning","alertname":"SlowDisk"},"annotations":{},"status":"firing"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_secs(1)).await;

    let (status, _) = post_alerts(
        server.router(),
        r#"{"alerts":[{"labels":{"severity":"critical","alertname":"DiskFull"},"annotations":{},"status":"firing"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_secs(30)).await;
    settle().await;

    let deliveries = channel.deliveries();
    assert_eq!(deliveries.len(), 1);

    let digest = &deliveries[0].1;
    assert!(digest.contains("Total: 2 alert(s)"));

    let critical_pos = digest.find("CRITICAL ALERTS").unwrap();
    let warning_pos = digest.find("WARNING ALERTS").unwrap();
    assert!(critical_pos < warning_pos);
}

#[tokio::test(start_paused = true)]
async fn malformed_body_is_rejected_without_side_effects() {
    let (server, channel) = make_server(&["ops-room"]);

    let (status, body) = post_alerts(server.router(), "this is not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Error:"));
    assert!(!server.aggregator().is_armed());
    assert_eq!(server.aggregator().pending_len(), 0);

    tokio::time::sleep(Duration::from_secs(60)).await;
    settle().await;
    assert!(channel.deliveries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn non_object_body_is_rejected() {
    let (server, _channel) = make_server(&["ops-room"]);

    let (status, body) = post_alerts(server.router(), r#"[{"labels": {}}]"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Error:"));
}

#[tokio::test(start_paused = true)]
async fn failing_recipient_does_not_block_the_others() {
    let (server, channel) =
        make_server_with_channel(&["first", "second", "third"], RecordingChannel::denying(&["second"]));

    let (status, _) = post_alerts(
        server.router(),
        r#"{"alerts":[{"labels":{"alertname":"DiskFull"},"annotations":{},"status":"firing"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_secs(31)).await;
    settle().await;

    let recipients: Vec<String> = channel
        .deliveries()
        .into_iter()
        .map(|(recipient, _)| recipient)
        .collect();
    assert_eq!(recipients, vec!["first", "third"]);
}

#[tokio::test(start_paused = true)]
async fn resolved_alert_renders_with_resolved_marker() {
    let (server, channel) = make_server(&["ops-room"]);

    let (status, _) = post_alerts(
        server.router(),
        r#"{"alerts":[{"labels":{"alertname":"DiskFull"},"annotations":{},"status":"resolved"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_secs(31)).await;
    settle().await;

    let deliveries = channel.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert!(deliveries[0].1.contains("RESOLVED"));
    assert!(!deliveries[0].1.contains("[FIRING]"));
}
