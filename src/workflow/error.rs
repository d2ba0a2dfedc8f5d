// ==========================================
// 预订改期引擎 - 流程层错误类型
// ==========================================
// 错误分类:
// - 许可类（不允许改期 / 已过截止）: 会话级致命，不可重试
// - 校验类（日期在过去 / 不在季节内）: 本地可恢复，不发生状态转换
// - 非法操作（当前步骤不支持该动作 / 提交进行中）: 调用方问题，状态不变
// ==========================================

use crate::domain::types::WorkflowStep;
use crate::engine::season_price::DateValidationError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("付款计划不允许改期")]
    NotPermitted,

    #[error("已超过改期截止日: {deadline}")]
    DeadlinePassed { deadline: NaiveDate },

    #[error("无效的流程操作: step={from}, action={action}")]
    InvalidTransition { from: WorkflowStep, action: String },

    #[error("改期提交进行中，请等待结果")]
    CommitInFlight,

    #[error("季节列表尚未加载")]
    SeasonsNotLoaded,

    #[error("季节不存在或未激活: {0}")]
    SeasonNotFound(String),

    #[error("尚未选择季节")]
    NoSeasonSelected,

    #[error(transparent)]
    DateValidation(#[from] DateValidationError),

    #[error("改期流程已关闭")]
    Closed,
}

/// Result 类型别名
pub type WorkflowResult<T> = Result<T, WorkflowError>;
