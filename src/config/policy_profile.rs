use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 改期策略参数
///
/// 存储位置：config_kv（scope_id='global'），缺失的键使用默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateChangePolicyConfig {
    /// 现金计划涨价时补缴期限（小时）
    #[serde(default = "default_additional_payment_due_hours")]
    pub additional_payment_due_hours: u32,

    /// 退款处理最短工作日
    #[serde(default = "default_refund_min_business_days")]
    pub refund_min_business_days: u32,

    /// 退款处理最长工作日
    #[serde(default = "default_refund_max_business_days")]
    pub refund_max_business_days: u32,

    /// 季节未定义儿童价时，儿童价 = 成人价 × 该比例
    #[serde(default = "default_child_price_fallback_ratio")]
    pub child_price_fallback_ratio: Decimal,
}

fn default_additional_payment_due_hours() -> u32 {
    48
}

fn default_refund_min_business_days() -> u32 {
    5
}

fn default_refund_max_business_days() -> u32 {
    7
}

fn default_child_price_fallback_ratio() -> Decimal {
    Decimal::new(5, 1)
}

impl Default for DateChangePolicyConfig {
    fn default() -> Self {
        Self {
            additional_payment_due_hours: default_additional_payment_due_hours(),
            refund_min_business_days: default_refund_min_business_days(),
            refund_max_business_days: default_refund_max_business_days(),
            child_price_fallback_ratio: default_child_price_fallback_ratio(),
        }
    }
}

impl DateChangePolicyConfig {
    /// 参数合法性校验，返回违规说明
    pub fn validate(&self) -> Result<(), String> {
        if self.refund_min_business_days > self.refund_max_business_days {
            return Err(format!(
                "refund_min_business_days({}) > refund_max_business_days({})",
                self.refund_min_business_days, self.refund_max_business_days
            ));
        }
        if self.child_price_fallback_ratio.is_sign_negative()
            || self.child_price_fallback_ratio > Decimal::ONE
        {
            return Err(format!(
                "child_price_fallback_ratio 超出 [0, 1]: {}",
                self.child_price_fallback_ratio
            ));
        }
        Ok(())
    }
}
