//! プローブサイクル
//!
//! 1サイクル = ディスカバリー → 全ターゲットのヘルスパス → 全ターゲットのメトリクスパス。
//! 各パス内のプローブはターゲットごとに別タスクで並列実行し、失敗はそのターゲットの
//! 状態にのみ反映する。

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use dm_monitor_common::error::ProbeError;
use dm_monitor_common::types::{HealthStatus, MetricsValue, Target};
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::scheduler::Cycle;
use crate::discovery::Discovery;
use crate::prober::{Egress, Prober};
use crate::registry::TargetRegistry;

/// プローブの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// `{endpoint}/health`
    Health,
    /// `{endpoint}/metrics`
    Metrics,
}

impl ProbeKind {
    /// エンドポイントに付与するパス
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Metrics => "metrics",
        }
    }
}

/// ターゲット1件のプローブ結果
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOutcome {
    /// ターゲット名
    pub target: String,
    /// 成功時はペイロード、失敗時は理由
    pub result: Result<Value, ProbeError>,
}

impl TargetOutcome {
    /// 成功したか
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 1サイクル分の集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// このサイクルで新規追加されたターゲット数
    pub added: usize,
    /// ヘルスパスの結果（ターゲット名順）
    pub health: Vec<TargetOutcome>,
    /// メトリクスパスの結果（ターゲット名順）
    pub metrics: Vec<TargetOutcome>,
}

impl CycleReport {
    /// 指定ターゲットのヘルス結果
    pub fn health_of(&self, target: &str) -> Option<&TargetOutcome> {
        self.health.iter().find(|o| o.target == target)
    }

    /// 指定ターゲットのメトリクス結果
    pub fn metrics_of(&self, target: &str) -> Option<&TargetOutcome> {
        self.metrics.iter().find(|o| o.target == target)
    }
}

/// ディスカバリーとヘルス・メトリクス取得を行うサイクル
#[derive(Clone)]
pub struct ProbeCycle {
    registry: TargetRegistry,
    prober: Arc<dyn Prober>,
    egress: Egress,
    discovery: Discovery,
}

impl ProbeCycle {
    /// サイクルを作成
    pub fn new(
        registry: TargetRegistry,
        prober: Arc<dyn Prober>,
        egress: Egress,
        products_path: impl Into<String>,
    ) -> Self {
        let discovery = Discovery::new(prober.clone(), egress.clone(), products_path);
        Self {
            registry,
            prober,
            egress,
            discovery,
        }
    }

    /// サイクルを1回実行
    pub async fn execute(&self) -> CycleReport {
        let start = Instant::now();

        let discovered = self.discovery.discover().await;
        let added = self.registry.merge_discovered(discovered).await;

        // ディスカバリー後のターゲット集合を固定してから両パスを回す
        let targets = self.registry.targets().await;

        let health = self.run_pass(&targets, ProbeKind::Health).await;
        let metrics = self.run_pass(&targets, ProbeKind::Metrics).await;

        info!(
            targets = targets.len(),
            added,
            health_ok = health.iter().filter(|o| o.is_success()).count(),
            health_failed = health.iter().filter(|o| !o.is_success()).count(),
            metrics_available = metrics.iter().filter(|o| o.is_success()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Probe cycle completed"
        );

        CycleReport {
            added,
            health,
            metrics,
        }
    }

    async fn run_pass(&self, targets: &[Target], kind: ProbeKind) -> Vec<TargetOutcome> {
        let handles: Vec<_> = targets
            .iter()
            .cloned()
            .map(|target| {
                let cycle = self.clone();
                tokio::spawn(async move { cycle.probe_target(&target, kind).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(targets.len());
        for (target, joined) in targets.iter().zip(join_all(handles).await) {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    error!(
                        target_name = %target.name,
                        kind = kind.suffix(),
                        error = %e,
                        "Probe task failed"
                    );
                    let result = Err(ProbeError::new(format!("probe task failed: {}", e)));
                    self.record(&target.name, kind, &result).await;
                    result
                }
            };
            outcomes.push(TargetOutcome {
                target: target.name.clone(),
                result,
            });
        }
        outcomes
    }

    async fn probe_target(&self, target: &Target, kind: ProbeKind) -> Result<Value, ProbeError> {
        let request = self.egress.get(target.probe_path(kind.suffix()));
        let result = self.prober.probe(&request).await;

        match &result {
            Ok(_) => debug!(
                target_name = %target.name,
                path = %request.path,
                kind = kind.suffix(),
                "Probe succeeded"
            ),
            Err(e) => warn!(
                target_name = %target.name,
                path = %request.path,
                kind = kind.suffix(),
                error = %e,
                "Probe failed"
            ),
        }

        self.record(&target.name, kind, &result).await;
        result
    }

    async fn record(&self, name: &str, kind: ProbeKind, result: &Result<Value, ProbeError>) {
        match kind {
            ProbeKind::Health => {
                self.registry
                    .record_health(name, HealthStatus::from_probe(result))
                    .await
            }
            ProbeKind::Metrics => {
                self.registry
                    .record_metrics(name, MetricsValue::from_probe(result))
                    .await
            }
        }
    }
}

#[async_trait]
impl Cycle for ProbeCycle {
    async fn run_cycle(&self) {
        self.execute().await;
    }
}
