// ==========================================
// 预订改期引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含外部调用,不含引擎逻辑
// ==========================================

pub mod money;
pub mod payment_plan;
pub mod reservation;
pub mod season;
pub mod selection;
pub mod types;

// 重导出核心类型
pub use money::{format_money, round_currency, PriceDelta};
pub use payment_plan::{DeadlinePolicy, Installment, InstallmentSummary, PaymentPlan};
pub use reservation::{PartyComposition, Product, Reservation};
pub use season::{ChildPriceRange, Season};
pub use selection::SelectedDateData;
pub use types::{
    AdjustmentDirection, ImpactCategory, InstallmentBucket, InstallmentStatus, PlanType,
    PriceDeltaSign, ProductType, WorkflowStep, WORKFLOW_STEP_COUNT,
};
