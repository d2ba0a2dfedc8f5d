// ==========================================
// 预订改期引擎 - 付款影响分类引擎
// ==========================================
// 职责: 根据差价方向与付款方式判定资金后果，并生成说明文案
// 输入: 原总价 + 新总价 + 付款方式 + 分期明细
// 输出: PaymentImpact
// ==========================================
// 分类表（穷举）:
// | 方向     | 付款方式      | 分类                         |
// | Same     | 任意          | NoChange                     |
// | Increase | CASH          | AdditionalPaymentRequired    |
// | Decrease | CASH          | RefundAvailable              |
// | Increase | INSTALLMENTS  | PlanAdjustment(Increase)     |
// | Decrease | INSTALLMENTS  | PlanAdjustment(Decrease)     |
// ==========================================

use crate::config::DateChangePolicyConfig;
use crate::domain::money::{format_money, PriceDelta};
use crate::domain::payment_plan::{Installment, InstallmentSummary};
use crate::domain::types::{AdjustmentDirection, ImpactCategory, PlanType, PriceDeltaSign};
use crate::i18n::{t, t_with_args};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 分类输入
#[derive(Debug, Clone, Copy)]
pub struct ImpactInput<'a> {
    pub current_total: Decimal,
    pub new_total: Decimal,
    pub plan_type: PlanType,
    pub installments: &'a [Installment],
    pub currency: &'a str,
}

/// 付款影响
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentImpact {
    pub sign: PriceDeltaSign,
    pub category: ImpactCategory,
    pub delta: PriceDelta,
    pub amount: Decimal, // 差价绝对值
    pub currency: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_summary: Option<InstallmentSummary>,
}

// ==========================================
// PaymentImpactClassifier - 付款影响分类器
// ==========================================
// 红线: 无状态引擎，同样的输入必得同样的分类
pub struct PaymentImpactClassifier {
    policy: DateChangePolicyConfig,
}

impl PaymentImpactClassifier {
    pub fn new() -> Self {
        Self::with_policy(DateChangePolicyConfig::default())
    }

    pub fn with_policy(policy: DateChangePolicyConfig) -> Self {
        Self { policy }
    }

    /// 分类表
    pub fn categorize(sign: PriceDeltaSign, plan_type: PlanType) -> ImpactCategory {
        match (sign, plan_type) {
            (PriceDeltaSign::Same, _) => ImpactCategory::NoChange,
            (PriceDeltaSign::Increase, PlanType::Cash) => ImpactCategory::AdditionalPaymentRequired,
            (PriceDeltaSign::Decrease, PlanType::Cash) => ImpactCategory::RefundAvailable,
            (PriceDeltaSign::Increase, PlanType::Installments) => {
                ImpactCategory::PlanAdjustment(AdjustmentDirection::Increase)
            }
            (PriceDeltaSign::Decrease, PlanType::Installments) => {
                ImpactCategory::PlanAdjustment(AdjustmentDirection::Decrease)
            }
        }
    }

    /// 判定付款影响
    #[instrument(skip(self, input), fields(plan_type = %input.plan_type))]
    pub fn classify(&self, input: &ImpactInput<'_>) -> PaymentImpact {
        let delta = PriceDelta::new(input.current_total, input.new_total);
        let sign = delta.sign();
        let category = Self::categorize(sign, input.plan_type);

        // 仅分期计划、有差价且存在分期明细时附带分期汇总
        let installment_summary = match (sign, input.plan_type) {
            (PriceDeltaSign::Same, _) | (_, PlanType::Cash) => None,
            (_, PlanType::Installments) if input.installments.is_empty() => None,
            (_, PlanType::Installments) => {
                Some(InstallmentSummary::from_installments(input.installments))
            }
        };

        let amount = delta.magnitude();
        let (title, description) =
            self.explain(category, amount, input.currency, installment_summary);

        tracing::debug!(%category, %amount, "付款影响已判定");

        PaymentImpact {
            sign,
            category,
            delta,
            amount,
            currency: input.currency.to_string(),
            title,
            description,
            installment_summary,
        }
    }

    // ==========================================
    // 文案
    // ==========================================

    fn explain(
        &self,
        category: ImpactCategory,
        amount: Decimal,
        currency: &str,
        summary: Option<InstallmentSummary>,
    ) -> (String, String) {
        let amount_text = format_money(amount, currency);
        let summary = summary.unwrap_or_default();
        let paid = summary.paid_count.to_string();
        let pending = summary.pending_count.to_string();
        let hours = self.policy.additional_payment_due_hours.to_string();
        let min_days = self.policy.refund_min_business_days.to_string();
        let max_days = self.policy.refund_max_business_days.to_string();

        match category {
            ImpactCategory::NoChange => (
                t("impact.no_change.title"),
                t("impact.no_change.description"),
            ),
            ImpactCategory::AdditionalPaymentRequired => (
                t("impact.additional_payment.title"),
                t_with_args(
                    "impact.additional_payment.description",
                    &[
                        ("amount", amount_text.as_str()),
                        ("hours", hours.as_str()),
                    ],
                ),
            ),
            ImpactCategory::RefundAvailable => (
                t("impact.refund.title"),
                t_with_args(
                    "impact.refund.description",
                    &[
                        ("amount", amount_text.as_str()),
                        ("min_days", min_days.as_str()),
                        ("max_days", max_days.as_str()),
                    ],
                ),
            ),
            ImpactCategory::PlanAdjustment(AdjustmentDirection::Increase) => (
                t("impact.plan_increase.title"),
                t_with_args(
                    "impact.plan_increase.description",
                    &[
                        ("amount", amount_text.as_str()),
                        ("pending", pending.as_str()),
                        ("paid", paid.as_str()),
                    ],
                ),
            ),
            ImpactCategory::PlanAdjustment(AdjustmentDirection::Decrease) => (
                t("impact.plan_decrease.title"),
                t_with_args(
                    "impact.plan_decrease.description",
                    &[
                        ("amount", amount_text.as_str()),
                        ("pending", pending.as_str()),
                        ("paid", paid.as_str()),
                    ],
                ),
            ),
        }
    }
}

impl Default for PaymentImpactClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::InstallmentStatus;
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};
    use chrono::NaiveDate;

    fn installments(statuses: &[InstallmentStatus]) -> Vec<Installment> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Installment {
                number: i as u32 + 1,
                amount: Decimal::new(4000, 0),
                due_date: NaiveDate::from_ymd_opt(2030, 1 + i as u32, 1).unwrap(),
                status: *status,
            })
            .collect()
    }

    fn input<'a>(
        current: i64,
        new: i64,
        plan_type: PlanType,
        items: &'a [Installment],
    ) -> ImpactInput<'a> {
        ImpactInput {
            current_total: Decimal::new(current, 0),
            new_total: Decimal::new(new, 0),
            plan_type,
            installments: items,
            currency: "MXN",
        }
    }

    #[test]
    fn test_categorize_is_total() {
        let signs = [
            PriceDeltaSign::Same,
            PriceDeltaSign::Increase,
            PriceDeltaSign::Decrease,
        ];
        for sign in signs {
            for plan_type in [PlanType::Cash, PlanType::Installments] {
                let category = PaymentImpactClassifier::categorize(sign, plan_type);
                if sign == PriceDeltaSign::Same {
                    assert_eq!(category, ImpactCategory::NoChange);
                } else {
                    assert_ne!(category, ImpactCategory::NoChange);
                }
            }
        }
    }

    #[test]
    fn test_same_price_has_no_summary() {
        let classifier = PaymentImpactClassifier::new();
        let items = installments(&[InstallmentStatus::Paid, InstallmentStatus::Pending]);

        for plan_type in [PlanType::Cash, PlanType::Installments] {
            let impact = classifier.classify(&input(15000, 15000, plan_type, &items));
            assert_eq!(impact.category, ImpactCategory::NoChange);
            assert_eq!(impact.amount, Decimal::ZERO);
            assert!(impact.installment_summary.is_none());
        }
    }

    #[test]
    fn test_cash_increase_requires_payment() {
        let classifier = PaymentImpactClassifier::new();
        let impact = classifier.classify(&input(15000, 16500, PlanType::Cash, &[]));
        assert_eq!(impact.category, ImpactCategory::AdditionalPaymentRequired);
        assert_eq!(impact.amount, Decimal::new(1500, 0));
        assert!(impact.installment_summary.is_none());
    }

    #[test]
    fn test_installments_without_items_has_no_summary() {
        let classifier = PaymentImpactClassifier::new();
        let impact = classifier.classify(&input(12500, 13000, PlanType::Installments, &[]));
        assert_eq!(
            impact.category,
            ImpactCategory::PlanAdjustment(AdjustmentDirection::Increase)
        );
        assert!(impact.installment_summary.is_none());
    }

    #[test]
    fn test_refund_text_uses_policy_window() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let classifier = PaymentImpactClassifier::new();
        let impact = classifier.classify(&input(15000, 14000, PlanType::Cash, &[]));
        assert_eq!(impact.category, ImpactCategory::RefundAvailable);
        assert_eq!(impact.title, "Refund available");
        assert!(impact.description.contains("$1,000.00 MXN"));
        assert!(impact.description.contains("5-7 business days"));

        set_locale("zh-CN");
    }
}
