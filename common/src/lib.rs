//! Data Mesh Monitor 共通ライブラリ
//!
//! 設定・コア型・通信プロトコル・エラー型を提供する

#![warn(missing_docs)]

/// 設定管理（YAML + 環境変数）
pub mod config;

/// エラー型定義
pub mod error;

/// 通信プロトコル定義
pub mod protocol;

/// 共通型定義
pub mod types;
