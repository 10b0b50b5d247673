//! 起動処理
//!
//! 設定からレジストリ・プローバー・サイクルを組み立て、初回サイクル完了後に
//! スケジューラーとHTTPサーバーを起動する。

use std::sync::Arc;

use dm_monitor_common::config::MonitorConfig;
use dm_monitor_common::error::MonitorResult;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cli::Cli;
use crate::health::{ProbeCycle, Scheduler};
use crate::prober::{Egress, HttpProber};
use crate::registry::TargetRegistry;
use crate::{server, AppState};

/// 監視を開始する
///
/// 初回サイクルの完了を待ってから戻る。戻り値のハンドルは定期実行ループ。
pub async fn start_monitoring(config: &MonitorConfig) -> MonitorResult<(AppState, JoinHandle<()>)> {
    let registry = TargetRegistry::with_targets(config.static_targets());
    info!(
        targets = registry.len().await,
        proxy_host = %config.proxy.host,
        proxy_port = config.proxy.port,
        "Initialized target registry"
    );

    let prober = Arc::new(HttpProber::new(config.request_timeout())?);
    let egress = Egress::new(
        &config.proxy.host,
        config.proxy.port,
        &config.monitor.caller_id,
    );
    let cycle = ProbeCycle::new(
        registry.clone(),
        prober,
        egress,
        &config.registrar.products_path,
    );

    let scheduler = Scheduler::new(cycle, config.interval()).start().await;

    Ok((AppState { registry }, scheduler))
}

/// 監視とHTTPサーバーを起動し、サーバー停止まで待機する
pub async fn run(cli: &Cli, config: MonitorConfig) -> MonitorResult<()> {
    let (state, scheduler) = start_monitoring(&config).await?;

    let result = server::run(state, &cli.bind_addr()).await;
    scheduler.abort();
    result
}
