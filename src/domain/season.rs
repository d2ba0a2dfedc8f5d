// ==========================================
// 预订改期引擎 - 季节价格领域模型
// ==========================================
// 季节来自外部价格目录，对引擎只读
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// ChildPriceRange - 儿童价格区间
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildPriceRange {
    pub name: String,
    pub min_age: u32,
    pub max_age: u32,
    pub price: Decimal,
}

// ==========================================
// Season - 季节（带价格的日期区间）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub adult_base_price: Decimal,
    #[serde(default)]
    pub child_prices: Vec<ChildPriceRange>,
    #[serde(default)]
    pub price_id: Option<String>, // 价格记录标识（提交改期时回传）
}

impl Season {
    /// 日期是否落在季节区间内（含首尾）
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// 第一个儿童价格区间
    pub fn first_child_range(&self) -> Option<&ChildPriceRange> {
        self.child_prices.first()
    }
}
