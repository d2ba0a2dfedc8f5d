// ==========================================
// 预订改期引擎 - 新日期选择结果
// ==========================================
// 生命周期: 用户确定季节+日期时创建，每次重新选择整体替换，
//           流程取消或完成后丢弃
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedDateData {
    pub date: NaiveDate,
    pub price_per_person: Decimal, // 成人单价
    pub price_per_kid: Decimal,    // 儿童单价（已解析兜底价）
    pub new_total_price: Decimal,
    #[serde(default)]
    pub season_id: Option<String>,
    #[serde(default)]
    pub season_name: Option<String>,
    #[serde(default)]
    pub price_id: Option<String>,
}
