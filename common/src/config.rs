//! 設定管理
//!
//! YAML設定ファイルと `DM_MONITOR_` 接頭辞の環境変数から MonitorConfig を読み込む。
//! ネストしたキーは `__` で区切る（例: `DM_MONITOR_PROXY__PORT=9000`）。

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat, Source};
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};
use crate::types::{Target, TargetOrigin};

/// 環境変数の接頭辞
pub const ENV_PREFIX: &str = "DM_MONITOR";

/// monitor設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// 全プローブの送出先プロキシ
    pub proxy: ProxyConfig,

    /// ポーリング設定
    #[serde(default)]
    pub monitor: PollingConfig,

    /// レジストラ設定
    #[serde(default)]
    pub registrar: RegistrarConfig,

    /// 静的に監視するターゲット (デフォルト: registrar, search)
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
}

/// プロキシ設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    /// プロキシホスト
    pub host: String,
    /// プロキシポート
    pub port: u16,
}

/// ポーリング設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingConfig {
    /// サイクル間隔（秒）(デフォルト: 30)
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// プローブ1回あたりのタイムアウト（秒）(デフォルト: 5)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// 呼び出し元識別ヘッダーの値 (デフォルト: "dm-monitor")
    #[serde(default = "default_caller_id")]
    pub caller_id: String,
}

/// レジストラ設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrarConfig {
    /// プロダクト一覧のパス (デフォルト: "/api/registration/products")
    #[serde(default = "default_products_path")]
    pub products_path: String,
}

/// 静的ターゲット設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// ターゲット名
    pub name: String,
    /// プローブ基底パス
    pub endpoint: String,
}

fn default_interval_seconds() -> u64 {
    30
}

fn default_timeout_seconds() -> u64 {
    5
}

fn default_caller_id() -> String {
    "dm-monitor".to_string()
}

fn default_products_path() -> String {
    "/api/registration/products".to_string()
}

fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig {
            name: "bgs-dm-registrar-srv".to_string(),
            endpoint: "/api/registration".to_string(),
        },
        TargetConfig {
            name: "bgs-dm-search-srv".to_string(),
            endpoint: "/api/search".to_string(),
        },
    ]
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            timeout_seconds: default_timeout_seconds(),
            caller_id: default_caller_id(),
        }
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            products_path: default_products_path(),
        }
    }
}

impl TargetConfig {
    /// 静的ターゲットに変換
    pub fn to_target(&self) -> Target {
        Target::new(&self.name, &self.endpoint, TargetOrigin::Static)
    }
}

impl MonitorConfig {
    /// YAMLファイルを読み込み、環境変数で上書きして検証する
    pub fn load(path: &Path) -> CommonResult<Self> {
        Self::from_source(File::from(path).format(FileFormat::Yaml).required(true))
    }

    /// YAML文字列から読み込む（環境変数の上書きも適用）
    pub fn from_yaml_str(yaml: &str) -> CommonResult<Self> {
        Self::from_source(File::from_str(yaml, FileFormat::Yaml))
    }

    fn from_source<S>(source: S) -> CommonResult<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値を検証
    pub fn validate(&self) -> CommonResult<()> {
        if self.proxy.host.trim().is_empty() {
            return Err(CommonError::Validation(
                "proxy.host must not be empty".to_string(),
            ));
        }
        if self.proxy.port == 0 {
            return Err(CommonError::Validation(
                "proxy.port must not be 0".to_string(),
            ));
        }
        if self.monitor.interval_seconds == 0 {
            return Err(CommonError::Validation(
                "monitor.interval_seconds must be at least 1".to_string(),
            ));
        }
        if self.monitor.timeout_seconds == 0 {
            return Err(CommonError::Validation(
                "monitor.timeout_seconds must be at least 1".to_string(),
            ));
        }
        if !self.registrar.products_path.starts_with('/') {
            return Err(CommonError::Validation(format!(
                "registrar.products_path must start with '/': {}",
                self.registrar.products_path
            )));
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.name.trim().is_empty() {
                return Err(CommonError::Validation(
                    "target name must not be empty".to_string(),
                ));
            }
            if !target.endpoint.starts_with('/') {
                return Err(CommonError::Validation(format!(
                    "endpoint of target '{}' must start with '/': {}",
                    target.name, target.endpoint
                )));
            }
            if !seen.insert(target.name.as_str()) {
                return Err(CommonError::Validation(format!(
                    "duplicate target name: {}",
                    target.name
                )));
            }
        }

        Ok(())
    }

    /// サイクル間隔
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_seconds)
    }

    /// プローブのタイムアウト
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.monitor.timeout_seconds)
    }

    /// 静的ターゲット一覧
    pub fn static_targets(&self) -> Vec<Target> {
        self.targets.iter().map(TargetConfig::to_target).collect()
    }
}
