// ==========================================
// 预订改期引擎 - 引擎层
// ==========================================
// 职责: 改期业务规则（纯函数），不发起外部调用
// 红线: 引擎无状态，所有判定必须可解释
// ==========================================

pub mod deadline;
pub mod payment_impact;
pub mod season_price;

// 重导出核心引擎
pub use deadline::{DeadlinePolicyEvaluator, DeadlineStatus, EntryGate};
pub use payment_impact::{ImpactInput, PaymentImpact, PaymentImpactClassifier};
pub use season_price::{DateValidationError, SeasonPriceCalculator, SeasonQuote};
