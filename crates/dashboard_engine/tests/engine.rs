use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashboard_engine::{DashboardEngine, FetchSettings, PollOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_dashboard_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Spring Sale"},
            {"id": 2, "name": "Brand Awareness"},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "impressions": 1200,
            "clicks": 45,
            "users": 30,
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_drives_both_configured_stores() {
    let server = mock_dashboard_api().await;
    let engine = DashboardEngine::new(&server.uri(), FetchSettings::default()).unwrap();

    let notifications = Arc::new(Mutex::new(0usize));
    let sink = notifications.clone();
    engine.metrics().subscribe(move |_| {
        *sink.lock().unwrap() += 1;
    });

    engine.load_campaigns();
    engine.start_metrics(
        "1",
        PollOptions {
            enable_polling: true,
            interval: Duration::from_millis(50),
            min_loading: Duration::from_millis(10),
        },
    );
    tokio::time::sleep(Duration::from_millis(400)).await;

    let campaigns = engine.campaigns().read().view();
    assert!(!campaigns.is_loading);
    assert_eq!(campaigns.items.len(), 2);
    assert_eq!(campaigns.items[0].name, "Spring Sale");

    let metrics = engine.metrics().read().view();
    assert!(!metrics.is_loading);
    assert!(metrics.items.len() >= 2);
    assert_eq!(metrics.items[0].impressions, 1200.0);
    assert!(*notifications.lock().unwrap() >= 2);

    engine.stop();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let settled = engine.metrics().read().view();

    // No polling after teardown; the accumulated history stays readable.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(engine.metrics().read().view(), settled);
    assert!(!settled.items.is_empty());
}
