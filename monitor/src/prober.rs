//! 外向きプローブ
//!
//! プロキシ経由で監視対象へ単発のHTTPリクエストを送り、デコード済みJSONを返す。
//! 失敗はすべて [`ProbeError`] に畳み込み、リトライは行わない。

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use dm_monitor_common::error::{MonitorError, MonitorResult, ProbeError};
use dm_monitor_common::protocol::{CALLER_ID_HEADER, CORRELATION_ID_HEADER};
use reqwest::{Client, Method};
use serde_json::Value;
use uuid::Uuid;

/// 単発プローブのリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// 送出先ホスト
    pub host: String,
    /// 送出先ポート
    pub port: u16,
    /// リクエストパス
    pub path: String,
    /// HTTPメソッド（現状GETのみ使用）
    pub method: Method,
    /// 追加ヘッダー
    pub headers: HashMap<String, String>,
}

impl ProbeRequest {
    /// リクエストURL
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

/// プローブ実行のtrait
///
/// プローブサイクルとディスカバリーはこのtrait越しに外部I/Oを行う。
#[async_trait]
pub trait Prober: Send + Sync {
    /// リクエストを1回だけ送信し、成功時はデコード済みペイロードを返す
    async fn probe(&self, request: &ProbeRequest) -> Result<Value, ProbeError>;
}

/// reqwestによるHTTPプローブ
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// リクエストタイムアウト付きのプローバーを作成
    pub fn new(timeout: Duration) -> MonitorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, request: &ProbeRequest) -> Result<Value, ProbeError> {
        let url = request.url();
        let mut builder = self.client.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProbeError::new(format!("{} {}: {}", request.method, url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::new(format!(
                "{} {}: HTTP {}",
                request.method, url, status
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            ProbeError::new(format!(
                "{} {}: invalid payload: {}",
                request.method, url, e
            ))
        })
    }
}

/// 送出先プロキシと呼び出し元識別
///
/// すべてのプローブはこのプロキシに向けて送信される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Egress {
    /// プロキシホスト
    pub host: String,
    /// プロキシポート
    pub port: u16,
    /// 呼び出し元識別ヘッダーの値
    pub caller_id: String,
}

impl Egress {
    /// 送出設定を作成
    pub fn new(host: impl Into<String>, port: u16, caller_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            caller_id: caller_id.into(),
        }
    }

    /// 指定パスへのGETリクエストを組み立てる
    ///
    /// 相関IDはリクエストごとに新しく採番する。
    pub fn get(&self, path: impl Into<String>) -> ProbeRequest {
        let mut headers = HashMap::new();
        headers.insert(CALLER_ID_HEADER.to_string(), self.caller_id.clone());
        headers.insert(
            CORRELATION_ID_HEADER.to_string(),
            Uuid::new_v4().to_string(),
        );

        ProbeRequest {
            host: self.host.clone(),
            port: self.port,
            path: path.into(),
            method: Method::GET,
            headers,
        }
    }
}
