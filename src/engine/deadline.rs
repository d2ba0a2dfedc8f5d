// ==========================================
// 预订改期引擎 - 改期截止期判定
// ==========================================
// 职责: 计算改期截止日并判断当前是否已过截止
// 输入: 出行日期 + 截止策略 + 当前时间
// 输出: DeadlineStatus
// 红线: 纯函数，无副作用，对所有输入均有定义
// ==========================================

use crate::domain::payment_plan::{DeadlinePolicy, PaymentPlan};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 截止期判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineStatus {
    pub deadline_date: Option<NaiveDate>,
    pub is_past_deadline: bool,
}

impl DeadlineStatus {
    pub fn unrestricted() -> Self {
        Self {
            deadline_date: None,
            is_past_deadline: false,
        }
    }
}

// ==========================================
// EntryGate - 流程入口判定
// ==========================================
// 先看付款计划是否允许改期，再看截止期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryGate {
    Permitted { deadline: DeadlineStatus },
    NotPermitted,
    DeadlinePassed { deadline_date: NaiveDate },
}

impl EntryGate {
    pub fn is_permitted(&self) -> bool {
        matches!(self, EntryGate::Permitted { .. })
    }
}

// ==========================================
// DeadlinePolicyEvaluator - 截止期判定器
// ==========================================
pub struct DeadlinePolicyEvaluator;

impl DeadlinePolicyEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// 计算截止期
    ///
    /// - NoDeadline → 无截止，永不过期
    /// - DaysBefore(n) → deadline = travel_date - n 天（当日 00:00），now > deadline 即过期
    pub fn evaluate(
        &self,
        travel_date: NaiveDate,
        policy: DeadlinePolicy,
        now: NaiveDateTime,
    ) -> DeadlineStatus {
        let days = match policy {
            DeadlinePolicy::NoDeadline => return DeadlineStatus::unrestricted(),
            DeadlinePolicy::DaysBefore(days) => days.get(),
        };

        // 超出日历下界时取最早日期，结果必然已过期
        let deadline_date = travel_date
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let cutoff = deadline_date.and_time(NaiveTime::MIN);

        DeadlineStatus {
            deadline_date: Some(deadline_date),
            is_past_deadline: now > cutoff,
        }
    }

    /// 流程入口判定
    ///
    /// 顺序:
    /// 1) allowsDateChange = false → NotPermitted（不看截止期）
    /// 2) 已过截止 → DeadlinePassed
    /// 3) 其他 → Permitted
    #[instrument(skip(self, plan), fields(plan_id = %plan.id))]
    pub fn entry_gate(
        &self,
        plan: &PaymentPlan,
        travel_date: NaiveDate,
        now: NaiveDateTime,
    ) -> EntryGate {
        if !plan.permits_date_change() {
            tracing::info!("付款计划不允许改期");
            return EntryGate::NotPermitted;
        }

        let status = self.evaluate(travel_date, plan.change_deadline, now);
        match (status.is_past_deadline, status.deadline_date) {
            (true, Some(deadline_date)) => {
                tracing::info!(%deadline_date, "已超过改期截止日");
                EntryGate::DeadlinePassed { deadline_date }
            }
            _ => EntryGate::Permitted { deadline: status },
        }
    }
}

impl Default for DeadlinePolicyEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PlanType;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn plan(allows: Option<bool>, days: u32) -> PaymentPlan {
        PaymentPlan {
            id: "PP-1".to_string(),
            plan_type: PlanType::Cash,
            total_cost: Decimal::new(15000, 0),
            currency: "MXN".to_string(),
            allows_date_change: allows,
            change_deadline: DeadlinePolicy::days_before(days),
            installments: vec![],
        }
    }

    #[test]
    fn test_no_deadline_never_expires() {
        let evaluator = DeadlinePolicyEvaluator::new();
        let status = evaluator.evaluate(
            date(2030, 7, 10),
            DeadlinePolicy::NoDeadline,
            at(2031, 1, 1, 0, 0),
        );
        assert_eq!(status, DeadlineStatus::unrestricted());
    }

    #[test]
    fn test_deadline_date_subtracts_days() {
        let evaluator = DeadlinePolicyEvaluator::new();
        let status = evaluator.evaluate(
            date(2030, 7, 10),
            DeadlinePolicy::days_before(15),
            at(2030, 6, 20, 9, 0),
        );
        assert_eq!(status.deadline_date, Some(date(2030, 6, 25)));
        assert!(!status.is_past_deadline);
    }

    #[test]
    fn test_past_deadline_is_strictly_after_cutoff() {
        let evaluator = DeadlinePolicyEvaluator::new();
        let policy = DeadlinePolicy::days_before(10);

        // 截止日 00:00 整点尚未过期
        let at_cutoff = evaluator.evaluate(date(2030, 7, 10), policy, at(2030, 6, 30, 0, 0));
        assert!(!at_cutoff.is_past_deadline);

        let after = evaluator.evaluate(date(2030, 7, 10), policy, at(2030, 6, 30, 0, 1));
        assert!(after.is_past_deadline);
    }

    #[test]
    fn test_entry_gate_order() {
        let evaluator = DeadlinePolicyEvaluator::new();
        let travel = date(2030, 7, 10);
        let late = at(2030, 7, 9, 12, 0);

        // 不允许改期优先于截止期
        assert_eq!(
            evaluator.entry_gate(&plan(Some(false), 30), travel, late),
            EntryGate::NotPermitted
        );
        assert_eq!(
            evaluator.entry_gate(&plan(None, 30), travel, late),
            EntryGate::DeadlinePassed {
                deadline_date: date(2030, 6, 10)
            }
        );
        assert!(evaluator
            .entry_gate(&plan(Some(true), 0), travel, late)
            .is_permitted());
    }
}
