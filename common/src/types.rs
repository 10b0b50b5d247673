//! 共通型定義
//!
//! Target, HealthStatus, MetricsValue等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ProbeError;

/// メトリクス未取得を示すセンチネル文字列
pub const NOT_AVAILABLE: &str = "NOT-AVAILABLE";

/// ヘルス状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum HealthStatus {
    /// 未確認（初回プローブ前）
    #[default]
    Unknown,
    /// 直近のヘルスプローブが成功
    Ok,
    /// 直近のヘルスプローブが失敗
    NotOk,
}

impl HealthStatus {
    /// HealthStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Ok => "OK",
            Self::NotOk => "NOT-OK",
        }
    }

    /// プローブ結果からヘルス状態を決定
    pub fn from_probe<T>(result: &Result<T, ProbeError>) -> Self {
        if result.is_ok() {
            Self::Ok
        } else {
            Self::NotOk
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 直近に取得したメトリクス
///
/// JSONでは取得済みペイロードをそのまま、未取得時は `"NOT-AVAILABLE"` として出力する。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricsValue {
    /// 取得できていない
    #[default]
    NotAvailable,
    /// デコード済みのメトリクスペイロード
    Available(Value),
}

impl MetricsValue {
    /// プローブ結果からメトリクス値を決定
    pub fn from_probe(result: &Result<Value, ProbeError>) -> Self {
        match result {
            Ok(payload) => Self::Available(payload.clone()),
            Err(_) => Self::NotAvailable,
        }
    }

    /// 取得済みか
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl Serialize for MetricsValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(payload) => payload.serialize(serializer),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// ターゲットの登録経路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOrigin {
    /// 設定ファイルで静的に定義
    Static,
    /// レジストラから検出
    Discovered,
}

/// 監視対象
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// 識別子（サービス名またはアドレス）
    pub name: String,
    /// プローブURLの基底パス
    pub endpoint: String,
    /// 登録経路
    pub origin: TargetOrigin,
}

impl Target {
    /// 新しいターゲットを作成
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, origin: TargetOrigin) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            origin,
        }
    }

    /// `{endpoint}/{suffix}` 形式のプローブパスを組み立てる
    pub fn probe_path(&self, suffix: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), suffix)
    }
}

/// `/status` で返すターゲット単位の状態
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetStatus {
    /// プローブURLの基底パス
    pub endpoint: String,
    /// 登録経路
    pub origin: TargetOrigin,
    /// 直近のヘルス状態
    pub status: HealthStatus,
    /// 最終ヘルスプローブ時刻
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_health_check: Option<DateTime<Utc>>,
    /// 最終メトリクスプローブ時刻
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_metrics_check: Option<DateTime<Utc>>,
}
