//! Integration Test: プローブサイクル
//!
//! wiremockをプロキシとして、ディスカバリー・ヘルスパス・メトリクスパスを実HTTPで検証する。

use std::sync::Arc;
use std::time::Duration;

use dm_monitor::health::ProbeCycle;
use dm_monitor::prober::HttpProber;
use dm_monitor::registry::TargetRegistry;
use dm_monitor_common::protocol::{CALLER_ID_HEADER, CORRELATION_ID_HEADER};
use dm_monitor_common::types::{HealthStatus, MetricsValue, Target, TargetOrigin};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::proxy::{egress_for, mount_json, mount_status, PRODUCTS_PATH, TEST_CALLER_ID};

fn static_registry() -> TargetRegistry {
    TargetRegistry::with_targets(vec![
        Target::new("svc-a", "/a", TargetOrigin::Static),
        Target::new("svc-b", "/b", TargetOrigin::Static),
    ])
}

fn cycle_for(proxy: &MockServer, registry: &TargetRegistry, timeout: Duration) -> ProbeCycle {
    let prober = Arc::new(HttpProber::new(timeout).unwrap());
    ProbeCycle::new(registry.clone(), prober, egress_for(proxy), PRODUCTS_PATH)
}

/// レジストラ失敗・svc-b タイムアウトでも svc-a は正常に記録される
#[tokio::test]
async fn test_registrar_down_and_slow_target() {
    let proxy = MockServer::start().await;
    mount_status(&proxy, PRODUCTS_PATH, 503).await;
    mount_json(&proxy, "/a/health", json!({"status": "up"})).await;
    Mock::given(method("GET"))
        .and(path("/b/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "up"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&proxy)
        .await;
    mount_json(&proxy, "/a/metrics", json!({"qps": 10})).await;
    mount_status(&proxy, "/b/metrics", 500).await;

    let registry = static_registry();
    let report = cycle_for(&proxy, &registry, Duration::from_millis(300))
        .execute()
        .await;

    assert_eq!(report.added, 0);
    assert_eq!(
        serde_json::to_value(registry.health_snapshot().await).unwrap(),
        json!({"svc-a": "OK", "svc-b": "NOT-OK"})
    );
    assert_eq!(
        serde_json::to_value(registry.metrics_snapshot().await).unwrap(),
        json!({"svc-a": {"qps": 10}, "svc-b": "NOT-AVAILABLE"})
    );
}

/// 新しいプロダクトは同じサイクル内で検出・プローブされる
#[tokio::test]
async fn test_discovered_product_is_probed() {
    let proxy = MockServer::start().await;
    mount_json(
        &proxy,
        PRODUCTS_PATH,
        json!([{"address": "svc-c", "uuid": "xyz"}]),
    )
    .await;
    mount_json(&proxy, "/api/dataproducts/uuid/xyz/health", json!({})).await;
    mount_json(
        &proxy,
        "/api/dataproducts/uuid/xyz/metrics",
        json!({"rows": 42}),
    )
    .await;

    let registry = TargetRegistry::new();
    let report = cycle_for(&proxy, &registry, Duration::from_secs(2))
        .execute()
        .await;

    assert_eq!(report.added, 1);
    let record = registry.get("svc-c").await.unwrap();
    assert_eq!(record.target.endpoint, "/api/dataproducts/uuid/xyz");
    assert_eq!(record.target.origin, TargetOrigin::Discovered);
    assert_eq!(record.health, HealthStatus::Ok);
    assert_eq!(record.metrics, MetricsValue::Available(json!({"rows": 42})));
}

/// 同じレジストラ応答で再実行しても既存ターゲットは変化しない
#[tokio::test]
async fn test_rediscovery_is_additive() {
    let proxy = MockServer::start().await;
    mount_json(
        &proxy,
        PRODUCTS_PATH,
        json!([{"address": "svc-a", "uuid": "other"}, {"address": "svc-c", "uuid": "xyz"}]),
    )
    .await;
    mount_json(&proxy, "/a/health", json!({})).await;

    let registry = static_registry();
    let cycle = cycle_for(&proxy, &registry, Duration::from_secs(2));

    assert_eq!(cycle.execute().await.added, 1);
    assert_eq!(cycle.execute().await.added, 0);

    let status = registry.status_snapshot().await;
    assert_eq!(status.len(), 3);
    // 既知のアドレスはエンドポイントを上書きしない
    assert_eq!(status["svc-a"].endpoint, "/a");
    assert_eq!(status["svc-a"].status, HealthStatus::Ok);
    assert_eq!(status["svc-c"].endpoint, "/api/dataproducts/uuid/xyz");
}

/// すべてのプローブに呼び出し元識別と相関IDが付与される
#[tokio::test]
async fn test_probes_carry_tracing_headers() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header(CALLER_ID_HEADER, TEST_CALLER_ID))
        .and(header_exists(CORRELATION_ID_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(5)
        .mount(&proxy)
        .await;

    let registry = static_registry();
    cycle_for(&proxy, &registry, Duration::from_secs(2))
        .execute()
        .await;

    let health = registry.health_snapshot().await;
    assert_eq!(health["svc-a"], HealthStatus::Ok);
    assert_eq!(health["svc-b"], HealthStatus::Ok);
    proxy.verify().await;
}
