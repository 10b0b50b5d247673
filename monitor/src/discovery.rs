//! データプロダクトのディスカバリー
//!
//! レジストラのプロダクト一覧を取得し、監視ターゲットに変換する。

use std::sync::Arc;

use dm_monitor_common::error::ProbeError;
use dm_monitor_common::protocol::ProductDescriptor;
use dm_monitor_common::types::Target;
use tracing::{info, warn};

use crate::prober::{Egress, Prober};

/// レジストラからターゲットを検出する
#[derive(Clone)]
pub struct Discovery {
    prober: Arc<dyn Prober>,
    egress: Egress,
    products_path: String,
}

impl Discovery {
    /// ディスカバリーを作成
    pub fn new(prober: Arc<dyn Prober>, egress: Egress, products_path: impl Into<String>) -> Self {
        Self {
            prober,
            egress,
            products_path: products_path.into(),
        }
    }

    /// 現在のプロダクト一覧をターゲットとして返す
    ///
    /// レジストラに到達できない、または応答が不正な場合は空を返す。
    pub async fn discover(&self) -> Vec<Target> {
        match self.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Fetched products from registrar");
                products
                    .into_iter()
                    .map(ProductDescriptor::into_target)
                    .collect()
            }
            Err(e) => {
                warn!(
                    path = %self.products_path,
                    error = %e,
                    "Failed to fetch products from registrar, skipping discovery"
                );
                Vec::new()
            }
        }
    }

    async fn fetch_products(&self) -> Result<Vec<ProductDescriptor>, ProbeError> {
        let request = self.egress.get(&self.products_path);
        let body = self.prober.probe(&request).await?;
        serde_json::from_value(body)
            .map_err(|e| ProbeError::new(format!("malformed product list: {}", e)))
    }
}
