// ==========================================
// 预订改期引擎 - 金额与差价
// ==========================================
// 金额统一使用 rust_decimal::Decimal，不使用浮点
// ==========================================

use crate::domain::types::PriceDeltaSign;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 货币标准精度（小数位）
pub const CURRENCY_SCALE: u32 = 2;

/// 按货币标准精度取整（四舍五入）
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 格式化金额，例如 `$15,000.00 MXN`
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = round_currency(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text.clone(), "00".to_string()),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    let currency = currency.trim();
    if currency.is_empty() {
        format!("{}${}.{}", sign, grouped, frac_part)
    } else {
        format!("{}${}.{} {}", sign, grouped, frac_part, currency)
    }
}

// ==========================================
// PriceDelta - 新旧总价差
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDelta {
    pub current_total: Decimal,
    pub new_total: Decimal,
}

impl PriceDelta {
    pub fn new(current_total: Decimal, new_total: Decimal) -> Self {
        Self {
            current_total,
            new_total,
        }
    }

    /// 带符号差价（新 - 旧）
    pub fn amount(&self) -> Decimal {
        self.new_total - self.current_total
    }

    /// 差价绝对值
    pub fn magnitude(&self) -> Decimal {
        self.amount().abs()
    }

    pub fn sign(&self) -> PriceDeltaSign {
        let amount = self.amount();
        if amount.is_zero() {
            PriceDeltaSign::Same
        } else if amount.is_sign_positive() {
            PriceDeltaSign::Increase
        } else {
            PriceDeltaSign::Decrease
        }
    }
}
