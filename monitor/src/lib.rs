//! Data Mesh Monitor Server
//!
//! 依存サービスとデータプロダクトを定期的にプローブし、集約結果を公開するサイドカー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 起動処理
pub mod bootstrap;

/// CLIインターフェース
pub mod cli;

/// データプロダクトのディスカバリー
pub mod discovery;

/// ヘルスチェック監視（プローブサイクルとスケジューラー）
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 外向きプローブ
pub mod prober;

/// ターゲット登録管理（共有状態）
pub mod registry;

/// axumサーバー起動
pub mod server;


/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// ターゲットレジストリ
    pub registry: registry::TargetRegistry,
}
