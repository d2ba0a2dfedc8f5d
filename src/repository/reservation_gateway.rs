// ==========================================
// 预订改期引擎 - 改期提交接口
// ==========================================
// 职责: 定义改期提交接口（不包含传输实现）
// 说明: 资金动作（补缴/退款/分期调整）由对方系统在提交时执行
// ==========================================

use crate::domain::payment_plan::PaymentPlan;
use crate::domain::reservation::{Product, Reservation};
use crate::domain::selection::SelectedDateData;
use crate::repository::error::GatewayResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 改期提交请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateChangeRequest {
    pub reservation_id: String,
    pub payment_plan_id: String,
    pub product_id: String,
    pub new_date: NaiveDate,
    pub new_price_per_person: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_price_per_kid: Option<Decimal>,
    pub new_total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

impl DateChangeRequest {
    /// 由选择结果组装提交请求
    ///
    /// 儿童单价仅在预订含儿童时提交
    pub fn build(
        reservation: &Reservation,
        payment_plan: &PaymentPlan,
        product: &Product,
        selection: &SelectedDateData,
    ) -> Self {
        Self {
            reservation_id: reservation.id.clone(),
            payment_plan_id: payment_plan.id.clone(),
            product_id: product.id.clone(),
            new_date: selection.date,
            new_price_per_person: selection.price_per_person,
            new_price_per_kid: reservation
                .party
                .has_children()
                .then_some(selection.price_per_kid),
            new_total_price: selection.new_total_price,
            season_id: selection.season_id.clone(),
            price_id: selection.price_id.clone(),
        }
    }
}

// ==========================================
// ReservationDateChanger Trait
// ==========================================
// 对应外部接口 changeReservationDate(...)
#[async_trait]
pub trait ReservationDateChanger: Send + Sync {
    /// 提交改期
    ///
    /// # 返回
    /// - Ok(()): 对方已受理
    /// - Err(Rejected): 对方结构化拒绝
    /// - Err(Transport): 调用异常
    async fn change_reservation_date(&self, request: &DateChangeRequest) -> GatewayResult<()>;
}
