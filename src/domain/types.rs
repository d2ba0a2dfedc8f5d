// ==========================================
// 预订改期引擎 - 领域类型定义
// ==========================================
// 职责: 付款方式 / 分期状态 / 流程步骤 / 付款影响分类
// 序列化格式与外部接口保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 付款方式 (Plan Type)
// ==========================================
// CASH: 一次性付清（CONTADO）
// INSTALLMENTS: 分期付款（PLAZOS）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    #[serde(alias = "CONTADO")]
    Cash,
    #[serde(alias = "PLAZOS")]
    Installments,
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Cash => write!(f, "CASH"),
            PlanType::Installments => write!(f, "INSTALLMENTS"),
        }
    }
}

impl PlanType {
    /// 从字符串解析付款方式（兼容西语原值）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CASH" | "CONTADO" => Some(PlanType::Cash),
            "INSTALLMENTS" | "PLAZOS" => Some(PlanType::Installments),
            _ => None,
        }
    }
}

// ==========================================
// 产品类型 (Product Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Circuit, // 线路
    Package, // 套餐
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::Circuit => write!(f, "circuit"),
            ProductType::Package => write!(f, "package"),
        }
    }
}

// ==========================================
// 分期状态 (Installment Status)
// ==========================================
// paid/completed 归入已付; pending/due 归入待付; 其余状态不参与统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Paid,
    Completed,
    Pending,
    Due,
    #[serde(other)]
    Other,
}

/// 分期统计分桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentBucket {
    Paid,
    Pending,
}

impl InstallmentStatus {
    /// 归桶规则
    pub fn bucket(&self) -> Option<InstallmentBucket> {
        match self {
            InstallmentStatus::Paid | InstallmentStatus::Completed => Some(InstallmentBucket::Paid),
            InstallmentStatus::Pending | InstallmentStatus::Due => Some(InstallmentBucket::Pending),
            InstallmentStatus::Other => None,
        }
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallmentStatus::Paid => write!(f, "paid"),
            InstallmentStatus::Completed => write!(f, "completed"),
            InstallmentStatus::Pending => write!(f, "pending"),
            InstallmentStatus::Due => write!(f, "due"),
            InstallmentStatus::Other => write!(f, "other"),
        }
    }
}

// ==========================================
// 改期流程步骤 (Workflow Step)
// ==========================================
// 顺序: SelectingDate → Reviewing → Confirming → Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStep {
    SelectingDate, // 选择新日期
    Reviewing,     // 核对差价
    Confirming,    // 确认提交
    Completed,     // 已完成
}

/// 流程总步数
pub const WORKFLOW_STEP_COUNT: usize = 4;

impl WorkflowStep {
    /// 步骤序号（从 1 开始，供步骤条展示）
    pub fn index(&self) -> usize {
        match self {
            WorkflowStep::SelectingDate => 1,
            WorkflowStep::Reviewing => 2,
            WorkflowStep::Confirming => 3,
            WorkflowStep::Completed => 4,
        }
    }

    /// 步骤名称的翻译键
    pub fn label_key(&self) -> &'static str {
        match self {
            WorkflowStep::SelectingDate => "step.selecting_date",
            WorkflowStep::Reviewing => "step.reviewing",
            WorkflowStep::Confirming => "step.confirming",
            WorkflowStep::Completed => "step.completed",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStep::SelectingDate => write!(f, "SELECTING_DATE"),
            WorkflowStep::Reviewing => write!(f, "REVIEWING"),
            WorkflowStep::Confirming => write!(f, "CONFIRMING"),
            WorkflowStep::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 差价方向 (Price Delta Sign)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceDeltaSign {
    Same,     // 无差价
    Increase, // 涨价
    Decrease, // 降价
}

impl fmt::Display for PriceDeltaSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceDeltaSign::Same => write!(f, "SAME"),
            PriceDeltaSign::Increase => write!(f, "INCREASE"),
            PriceDeltaSign::Decrease => write!(f, "DECREASE"),
        }
    }
}

// ==========================================
// 付款影响分类 (Impact Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactCategory {
    NoChange,                               // 无资金动作
    AdditionalPaymentRequired,              // 现金: 需补缴差额
    RefundAvailable,                        // 现金: 退还差额
    PlanAdjustment(AdjustmentDirection),    // 分期: 调整待付分期
}

impl fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactCategory::NoChange => write!(f, "NO_CHANGE"),
            ImpactCategory::AdditionalPaymentRequired => write!(f, "ADDITIONAL_PAYMENT_REQUIRED"),
            ImpactCategory::RefundAvailable => write!(f, "REFUND_AVAILABLE"),
            ImpactCategory::PlanAdjustment(AdjustmentDirection::Increase) => {
                write!(f, "PLAN_ADJUSTMENT_INCREASE")
            }
            ImpactCategory::PlanAdjustment(AdjustmentDirection::Decrease) => {
                write!(f, "PLAN_ADJUSTMENT_DECREASE")
            }
        }
    }
}
