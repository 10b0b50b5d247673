//! REST APIハンドラー
//!
//! 監視結果の読み取り専用API

pub mod monitor;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// APIのパス接頭辞
pub const ENDPOINT_PREFIX: &str = "/api/monitor";

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            &format!("{}/health", ENDPOINT_PREFIX),
            get(monitor::get_health),
        )
        .route(
            &format!("{}/metrics", ENDPOINT_PREFIX),
            get(monitor::get_metrics),
        )
        .route(
            &format!("{}/status", ENDPOINT_PREFIX),
            get(monitor::get_status),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
