// ==========================================
// 预订改期引擎 - 付款计划领域模型
// ==========================================
// 职责: 付款方式、改期许可、改期截止天数、分期明细
// 红线: 只读输入，引擎不修改付款计划
// ==========================================

use crate::domain::types::{InstallmentBucket, InstallmentStatus, PlanType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

// ==========================================
// DeadlinePolicy - 改期截止策略
// ==========================================
// 外部字段 changeDeadlineDays: 缺省 / null / 0 均表示不设截止
// 领域内用显式枚举表达，不再用 0 充当"无策略"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum DeadlinePolicy {
    #[default]
    NoDeadline,
    DaysBefore(NonZeroU32),
}

impl DeadlinePolicy {
    pub fn days_before(days: u32) -> Self {
        NonZeroU32::new(days).map_or(DeadlinePolicy::NoDeadline, DeadlinePolicy::DaysBefore)
    }
}

impl From<Option<u32>> for DeadlinePolicy {
    fn from(days: Option<u32>) -> Self {
        days.map_or(DeadlinePolicy::NoDeadline, DeadlinePolicy::days_before)
    }
}

impl From<DeadlinePolicy> for Option<u32> {
    fn from(policy: DeadlinePolicy) -> Self {
        match policy {
            DeadlinePolicy::NoDeadline => None,
            DeadlinePolicy::DaysBefore(days) => Some(days.get()),
        }
    }
}

// ==========================================
// Installment - 分期明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub number: u32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
}

/// 分期状态汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSummary {
    pub paid_count: usize,
    pub pending_count: usize,
}

impl InstallmentSummary {
    /// 按状态分桶统计（未知状态不计入任何一桶）
    pub fn from_installments(installments: &[Installment]) -> Self {
        installments
            .iter()
            .fold(Self::default(), |mut acc, item| {
                match item.status.bucket() {
                    Some(InstallmentBucket::Paid) => acc.paid_count += 1,
                    Some(InstallmentBucket::Pending) => acc.pending_count += 1,
                    None => {}
                }
                acc
            })
    }
}

// ==========================================
// PaymentPlan - 付款计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlan {
    pub id: String,
    pub plan_type: PlanType,
    pub total_cost: Decimal,
    pub currency: String,
    #[serde(default)]
    pub allows_date_change: Option<bool>,
    #[serde(default, rename = "changeDeadlineDays")]
    pub change_deadline: DeadlinePolicy,
    #[serde(default)]
    pub installments: Vec<Installment>,
}

impl PaymentPlan {
    /// 是否允许改期（未设置视为允许）
    pub fn permits_date_change(&self) -> bool {
        self.allows_date_change.unwrap_or(true)
    }

    pub fn installment_summary(&self) -> InstallmentSummary {
        InstallmentSummary::from_installments(&self.installments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn installment(number: u32, status: InstallmentStatus) -> Installment {
        Installment {
            number,
            amount: Decimal::new(2500, 0),
            due_date: NaiveDate::from_ymd_opt(2030, 1, number).unwrap(),
            status,
        }
    }

    #[test]
    fn test_deadline_days_zero_means_no_deadline() {
        let plan: PaymentPlan = serde_json::from_value(json!({
            "id": "PP-1",
            "planType": "CASH",
            "totalCost": "15000",
            "currency": "MXN",
            "changeDeadlineDays": 0
        }))
        .unwrap();
        assert_eq!(plan.change_deadline, DeadlinePolicy::NoDeadline);
        assert!(plan.permits_date_change());

        let plan: PaymentPlan = serde_json::from_value(json!({
            "id": "PP-2",
            "planType": "INSTALLMENTS",
            "totalCost": "15000",
            "currency": "MXN",
            "allowsDateChange": false,
            "changeDeadlineDays": 15
        }))
        .unwrap();
        assert_eq!(plan.change_deadline, DeadlinePolicy::days_before(15));
        assert!(!plan.permits_date_change());
    }

    #[test]
    fn test_installment_summary_partition() {
        let items = vec![
            installment(1, InstallmentStatus::Paid),
            installment(2, InstallmentStatus::Completed),
            installment(3, InstallmentStatus::Due),
            installment(4, InstallmentStatus::Other),
        ];
        let summary = InstallmentSummary::from_installments(&items);
        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.pending_count, 1);
        assert!(summary.paid_count + summary.pending_count <= items.len());
    }

    #[test]
    fn test_relabel_equivalence() {
        let legacy = vec![
            installment(1, InstallmentStatus::Completed),
            installment(2, InstallmentStatus::Due),
        ];
        let current = vec![
            installment(1, InstallmentStatus::Paid),
            installment(2, InstallmentStatus::Pending),
        ];
        assert_eq!(
            InstallmentSummary::from_installments(&legacy),
            InstallmentSummary::from_installments(&current)
        );
    }
}
