//! ロギング初期化
//!
//! 標準出力へのfmtレイヤーに加え、`DM_MONITOR_LOG_DIR` 指定時は日次ローテーションの
//! ファイル出力を追加する。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// ログレベルの環境変数
pub const LOG_LEVEL_ENV: &str = "DM_MONITOR_LOG_LEVEL";

/// ログ出力ディレクトリの環境変数
pub const LOG_DIR_ENV: &str = "DM_MONITOR_LOG_DIR";

const LOG_FILE_PREFIX: &str = "dm-monitor.log";

/// グローバルsubscriberを初期化する
///
/// ファイル出力を有効にした場合、戻り値のガードはプロセス終了まで保持すること。
pub fn init() -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&level)?;

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
