//! Integration Test: 監視結果API
//!
//! 起動処理で初回サイクルを完了させ、実ポート上のAPIから結果を取得する。

use dm_monitor::api::create_router;
use dm_monitor::bootstrap::start_monitoring;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use wiremock::MockServer;

use crate::support::http::spawn_monitor;
use crate::support::proxy::{config_for, mount_json, mount_status, PRODUCTS_PATH};

async fn get_json(client: &Client, url: &str) -> (StatusCode, Value) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_results_of_initial_cycle_are_served() {
    let proxy = MockServer::start().await;
    mount_status(&proxy, PRODUCTS_PATH, 500).await;
    mount_json(&proxy, "/a/health", json!({"status": "up"})).await;
    mount_status(&proxy, "/b/health", 503).await;
    mount_json(&proxy, "/a/metrics", json!({"qps": 10})).await;

    let (state, scheduler) = start_monitoring(&config_for(&proxy)).await.unwrap();
    let server = spawn_monitor(create_router(state)).await;
    let client = Client::new();

    let (status, health) = get_json(&client, &server.url("/api/monitor/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({"svc-a": "OK", "svc-b": "NOT-OK"}));

    let (status, metrics) = get_json(&client, &server.url("/api/monitor/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics, json!({"svc-a": {"qps": 10}, "svc-b": "NOT-AVAILABLE"}));

    let (status, detail) = get_json(&client, &server.url("/api/monitor/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["svc-b"]["endpoint"], "/b");
    assert_eq!(detail["svc-b"]["status"], "NOT-OK");

    scheduler.abort();
    server.stop().await;
}

#[tokio::test]
async fn test_reads_do_not_trigger_probes() {
    let proxy = MockServer::start().await;
    mount_json(&proxy, PRODUCTS_PATH, json!([])).await;

    let (state, scheduler) = start_monitoring(&config_for(&proxy)).await.unwrap();
    let probes_after_startup = proxy.received_requests().await.unwrap().len();

    let server = spawn_monitor(create_router(state)).await;
    let client = Client::new();
    for _ in 0..3 {
        let (status, _) = get_json(&client, &server.url("/api/monitor/health")).await;
        assert_eq!(status, StatusCode::OK);
    }

    // 初回サイクル: products + health×2 + metrics×2
    assert_eq!(probes_after_startup, 5);
    assert_eq!(proxy.received_requests().await.unwrap().len(), 5);

    scheduler.abort();
    server.stop().await;
}
