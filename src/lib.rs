// ==========================================
// 预订改期引擎 - 核心库
// ==========================================
// 职责: 已有预订的出行日期变更流程
// 组成: 截止期判定 / 季节价格计算 / 付款影响分类 / 四步流程状态机
// 技术栈: Rust + SQLite（策略配置）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 外部协作接口层 - 季节查询 / 改期提交
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 流程层 - 改期会话
pub mod workflow;

// 配置层 - 策略配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AdjustmentDirection, ImpactCategory, InstallmentStatus, PlanType, PriceDeltaSign,
    ProductType, WorkflowStep,
};

// 领域实体
pub use domain::{
    DeadlinePolicy, Installment, PartyComposition, PaymentPlan, PriceDelta, Product,
    Reservation, Season, SelectedDateData,
};

// 引擎
pub use engine::{
    DeadlinePolicyEvaluator, DeadlineStatus, EntryGate, PaymentImpact, PaymentImpactClassifier,
    SeasonPriceCalculator,
};

// 流程
pub use workflow::{
    DateChangeContext, DateChangeWorkflow, WorkflowDeps, WorkflowError, WorkflowHost,
    WorkflowResult,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "预订改期引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
