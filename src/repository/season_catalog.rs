// ==========================================
// 预订改期引擎 - 季节目录接口
// ==========================================
// 职责: 定义季节查询接口（不包含传输实现）
// 红线: 只读，不做业务过滤（是否激活由流程层过滤）
// ==========================================

use crate::domain::season::Season;
use crate::repository::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

// ==========================================
// SeasonCatalog Trait
// ==========================================
// 对应外部接口 getSeasons(productId)
#[async_trait]
pub trait SeasonCatalog: Send + Sync {
    /// 查询产品的全部季节（含未激活季节）
    async fn get_seasons(&self, product_id: &str) -> GatewayResult<Vec<Season>>;
}

// ==========================================
// InMemorySeasonCatalog - 内存季节目录
// ==========================================
// 用途: 本地集成与测试
#[derive(Debug, Default)]
pub struct InMemorySeasonCatalog {
    seasons: RwLock<HashMap<String, Vec<Season>>>,
}

impl InMemorySeasonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记产品的季节列表（整体替换）
    pub fn insert(
        &self,
        product_id: impl Into<String>,
        seasons: Vec<Season>,
    ) -> GatewayResult<()> {
        let mut guard = self
            .seasons
            .write()
            .map_err(|e| GatewayError::from(anyhow::anyhow!("季节目录锁获取失败: {}", e)))?;
        guard.insert(product_id.into(), seasons);
        Ok(())
    }
}

#[async_trait]
impl SeasonCatalog for InMemorySeasonCatalog {
    async fn get_seasons(&self, product_id: &str) -> GatewayResult<Vec<Season>> {
        let guard = self
            .seasons
            .read()
            .map_err(|e| GatewayError::from(anyhow::anyhow!("季节目录锁获取失败: {}", e)))?;
        // 未登记的产品视为没有季节
        Ok(guard.get(product_id).cloned().unwrap_or_default())
    }
}
