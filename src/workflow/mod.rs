// ==========================================
// 预订改期引擎 - 流程层
// ==========================================
// 职责: 改期四步流程（选日期 → 核对 → 确认 → 完成）
// 依赖: engine（纯计算）、repository（外部调用 trait）
// ==========================================

pub mod clock;
pub mod error;
pub mod host;
pub mod selection;
pub mod session;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{WorkflowError, WorkflowResult};
pub use host::{NoOpHost, WorkflowHost};
pub use selection::{SeasonLoadState, SeasonSelection};
pub use session::{
    AvailableAction, BlockReason, BlockedNotice, CommitOutcome, DateChangeContext,
    DateChangeWorkflow, PriceComparison, StepIndicator, WorkflowDeps,
};
pub use state::{reduce, Transition, WorkflowAction, WorkflowEffect, WorkflowState};
