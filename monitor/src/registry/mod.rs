//! ターゲットレジストリ
//!
//! 監視対象と直近のヘルス・メトリクスをメモリ内で保持する共有状態。
//! 書き込みはプローブサイクルのみが行い、読み取りはAPIハンドラーが並行して行う。
//! 1ターゲットの状態は1レコードにまとめて保持するため、単一ターゲットの読み取りが
//! 書き込み途中の値を観測することはない。ターゲット間の一貫性は保証しない。

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dm_monitor_common::types::{HealthStatus, MetricsValue, Target, TargetStatus};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// ターゲット名→ヘルス状態のスナップショット
pub type HealthSnapshot = BTreeMap<String, HealthStatus>;

/// ターゲット名→メトリクスのスナップショット
pub type MetricsSnapshot = BTreeMap<String, MetricsValue>;

/// ターゲット名→状態詳細のスナップショット
pub type StatusSnapshot = BTreeMap<String, TargetStatus>;

/// ターゲット1件分の状態
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRecord {
    /// 監視対象
    pub target: Target,
    /// 直近のヘルス状態
    pub health: HealthStatus,
    /// 直近のメトリクス
    pub metrics: MetricsValue,
    /// 最終ヘルスプローブ時刻
    pub last_health_check: Option<DateTime<Utc>>,
    /// 最終メトリクスプローブ時刻
    pub last_metrics_check: Option<DateTime<Utc>>,
}

impl TargetRecord {
    fn new(target: Target) -> Self {
        Self {
            target,
            health: HealthStatus::Unknown,
            metrics: MetricsValue::NotAvailable,
            last_health_check: None,
            last_metrics_check: None,
        }
    }

    fn to_status(&self) -> TargetStatus {
        TargetStatus {
            endpoint: self.target.endpoint.clone(),
            origin: self.target.origin,
            status: self.health,
            last_health_check: self.last_health_check,
            last_metrics_check: self.last_metrics_check,
        }
    }
}

/// ターゲットレジストリ
///
/// ターゲットは追加のみで、プロセスの生存中に削除されることはない。
#[derive(Clone, Default)]
pub struct TargetRegistry {
    records: Arc<RwLock<HashMap<String, TargetRecord>>>,
}

impl TargetRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 静的ターゲットで初期化したレジストリを作成
    pub fn with_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        let records = targets
            .into_iter()
            .map(|target| (target.name.clone(), TargetRecord::new(target)))
            .collect();

        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// 検出したターゲットをマージし、新規追加した件数を返す
    ///
    /// 既知の名前は無視し、既存のエンドポイントや状態は上書きしない。
    pub async fn merge_discovered(&self, targets: Vec<Target>) -> usize {
        let mut records = self.records.write().await;
        let mut added = 0;

        for target in targets {
            if records.contains_key(&target.name) {
                debug!(target_name = %target.name, "Target already known, keeping existing entry");
                continue;
            }
            info!(
                target_name = %target.name,
                endpoint = %target.endpoint,
                "Discovered new target"
            );
            records.insert(target.name.clone(), TargetRecord::new(target));
            added += 1;
        }

        added
    }

    /// 現在のターゲット一覧（名前順）
    pub async fn targets(&self) -> Vec<Target> {
        let mut targets: Vec<Target> = self
            .records
            .read()
            .await
            .values()
            .map(|record| record.target.clone())
            .collect();
        targets.sort_by(|a, b| a.name.cmp(&b.name));
        targets
    }

    /// ターゲットの状態を取得
    pub async fn get(&self, name: &str) -> Option<TargetRecord> {
        self.records.read().await.get(name).cloned()
    }

    /// 登録済みターゲット数
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// ターゲットが1件もないか
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// ヘルスプローブの結果を記録
    pub async fn record_health(&self, name: &str, status: HealthStatus) {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(name) {
            record.health = status;
            record.last_health_check = Some(Utc::now());
        }
    }

    /// メトリクスプローブの結果を記録
    pub async fn record_metrics(&self, name: &str, metrics: MetricsValue) {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(name) {
            record.metrics = metrics;
            record.last_metrics_check = Some(Utc::now());
        }
    }

    /// 現在のヘルス状態のスナップショット
    pub async fn health_snapshot(&self) -> HealthSnapshot {
        self.records
            .read()
            .await
            .iter()
            .map(|(name, record)| (name.clone(), record.health))
            .collect()
    }

    /// 現在のメトリクスのスナップショット
    pub async fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.records
            .read()
            .await
            .iter()
            .map(|(name, record)| (name.clone(), record.metrics.clone()))
            .collect()
    }

    /// エンドポイントと状態詳細のスナップショット
    pub async fn status_snapshot(&self) -> StatusSnapshot {
        self.records
            .read()
            .await
            .iter()
            .map(|(name, record)| (name.clone(), record.to_status()))
            .collect()
    }
}
