//! サイクルスケジューラー
//!
//! 起動時に1回即時実行し、以降は「前サイクル終了 → 間隔だけ待機 → 次サイクル」を
//! プロセス終了まで繰り返す。サイクル同士が並行実行されることはない。

use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::info;

/// スケジューラーが繰り返し実行する処理
#[async_trait]
pub trait Cycle: Send + Sync + 'static {
    /// 1サイクル実行する
    async fn run_cycle(&self);
}

/// 固定間隔の直列スケジューラー
pub struct Scheduler<C> {
    cycle: C,
    interval: Duration,
}

impl<C: Cycle> Scheduler<C> {
    /// スケジューラーを作成
    pub fn new(cycle: C, interval: Duration) -> Self {
        Self { cycle, interval }
    }

    /// 初回サイクルを実行してから、バックグラウンドのループを起動する
    ///
    /// 戻り値のハンドルはループを保持するだけで、正常終了することはない。
    pub async fn start(self) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs_f64(),
            "Running initial probe cycle"
        );
        self.cycle.run_cycle().await;

        tokio::spawn(async move {
            self.run_loop().await;
        })
    }

    async fn run_loop(self) {
        info!(
            interval_secs = self.interval.as_secs_f64(),
            "Probe scheduler started"
        );
        loop {
            tokio::time::sleep(self.interval).await;
            self.cycle.run_cycle().await;
        }
    }
}
