use dm_monitor::prober::Egress;
use dm_monitor_common::config::MonitorConfig;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// テストで使う呼び出し元識別
pub const TEST_CALLER_ID: &str = "dm-monitor-it";

/// レジストラのプロダクト一覧パス
pub const PRODUCTS_PATH: &str = "/api/registration/products";

/// モックプロキシ宛ての送出設定
pub fn egress_for(proxy: &MockServer) -> Egress {
    let addr = proxy.address();
    Egress::new(addr.ip().to_string(), addr.port(), TEST_CALLER_ID)
}

/// モックプロキシ宛てで svc-a(/a), svc-b(/b) を静的ターゲットに持つ設定
#[allow(dead_code)]
pub fn config_for(proxy: &MockServer) -> MonitorConfig {
    let addr = proxy.address();
    let yaml = format!(
        r#"
proxy:
  host: "{}"
  port: {}
monitor:
  interval_seconds: 3600
  timeout_seconds: 1
  caller_id: {}
targets:
  - name: svc-a
    endpoint: /a
  - name: svc-b
    endpoint: /b
"#,
        addr.ip(),
        addr.port(),
        TEST_CALLER_ID
    );
    MonitorConfig::from_yaml_str(&yaml).expect("test configuration should be valid")
}

/// GETに固定JSONで応答するモックを登録する
pub async fn mount_json(proxy: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(proxy)
        .await;
}

/// GETに指定ステータスで応答するモックを登録する
pub async fn mount_status(proxy: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(proxy)
        .await;
}
