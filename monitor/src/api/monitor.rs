//! 監視結果APIハンドラー
//!
//! いずれもレジストリのスナップショットを返すだけで、プローブは発生させない。

use axum::{extract::State, Json};

use crate::registry::{HealthSnapshot, MetricsSnapshot, StatusSnapshot};
use crate::AppState;

/// GET /api/monitor/health - ターゲットごとのヘルス状態
pub async fn get_health(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(state.registry.health_snapshot().await)
}

/// GET /api/monitor/metrics - ターゲットごとの直近メトリクス
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.registry.metrics_snapshot().await)
}

/// GET /api/monitor/status - エンドポイントを含む状態詳細
pub async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.registry.status_snapshot().await)
}
