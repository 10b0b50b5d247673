//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// 外向きプローブの失敗
///
/// 接続失敗・タイムアウト・非2xx・ペイロード不正はすべてこの型に畳み込まれ、
/// 呼び出し側は失敗の種類を区別しない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Probe failed: {message}")]
pub struct ProbeError {
    /// 診断メッセージ
    pub message: String,
}

impl ProbeError {
    /// 診断メッセージからプローブ失敗を作成
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// monitor error type
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// I/O error (listener bind / serve)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (monitor)
pub type MonitorResult<T> = Result<T, MonitorError>;
