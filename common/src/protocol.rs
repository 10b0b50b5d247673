//! 通信プロトコル定義
//!
//! Monitor↔Registrar間、Monitor↔監視対象間のメッセージとヘッダー

use serde::{Deserialize, Serialize};

use crate::types::{Target, TargetOrigin};

/// 呼び出し元識別ヘッダー
pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// リクエスト単位の相関IDヘッダー
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// 検出したデータプロダクトのプローブパス接頭辞
pub const PRODUCT_ENDPOINT_PREFIX: &str = "/api/dataproducts/uuid";

/// レジストラが返すデータプロダクト記述子
///
/// `address` と `uuid` 以外のフィールドは無視する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductDescriptor {
    /// プロダクトのアドレス（ターゲット識別子として使用）
    pub address: String,
    /// プロダクトの一意ID
    pub uuid: String,
}

impl ProductDescriptor {
    /// プロダクトのプローブ基底パス
    pub fn probe_endpoint(&self) -> String {
        format!("{}/{}", PRODUCT_ENDPOINT_PREFIX, self.uuid)
    }

    /// 検出ターゲットに変換
    pub fn into_target(self) -> Target {
        let endpoint = self.probe_endpoint();
        Target::new(self.address, endpoint, TargetOrigin::Discovered)
    }
}
