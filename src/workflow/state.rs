// ==========================================
// 预订改期引擎 - 改期流程状态机
// ==========================================
// 状态: SelectingDate → Reviewing → Confirming → Completed
// 回退: 仅 Reviewing → SelectingDate、Confirming → Reviewing
// ==========================================
// 不变量:
// 1) 除 SelectingDate 外，selected_date_data 必须非空
// 2) is_saving 仅在提交进行中为 true；期间步骤不变，成功时才转入 Completed
// 3) 状态只通过 reduce 整体替换，不做零散修改
// ==========================================

use crate::domain::selection::SelectedDateData;
use crate::domain::types::WorkflowStep;
use crate::workflow::error::{WorkflowError, WorkflowResult};
use serde::{Deserialize, Serialize};

// ==========================================
// WorkflowState - 流程状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub current_step: WorkflowStep,
    pub selected_date_data: Option<SelectedDateData>,
    pub is_saving: bool,
    /// 取消确认提示是否打开
    pub cancel_prompt_open: bool,
    /// 最近一次提交失败的提示
    pub commit_error: Option<String>,
}

impl WorkflowState {
    pub fn initial() -> Self {
        Self {
            current_step: WorkflowStep::SelectingDate,
            selected_date_data: None,
            is_saving: false,
            cancel_prompt_open: false,
            commit_error: None,
        }
    }

    /// 校验不变量
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.current_step != WorkflowStep::SelectingDate && self.selected_date_data.is_none() {
            return Err(format!("{} 步骤缺少新日期选择", self.current_step));
        }
        if self.is_saving && self.current_step != WorkflowStep::Confirming {
            return Err(format!("{} 步骤不应处于提交中", self.current_step));
        }
        Ok(())
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::initial()
    }
}

// ==========================================
// WorkflowAction - 用户动作 / 异步结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowAction {
    /// 季节+日期已确定且校验通过
    DateSelected(SelectedDateData),
    Back,
    /// Reviewing: 进入确认；Confirming: 发起提交
    Confirm,
    CommitSucceeded,
    CommitFailed { message: String },
    /// SelectingDate: 直接关闭；Reviewing/Confirming: 打开确认提示
    Cancel,
    ConfirmCancel,
    DismissCancel,
    /// Completed: 确认完成并关闭
    Acknowledge,
}

impl WorkflowAction {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowAction::DateSelected(_) => "DateSelected",
            WorkflowAction::Back => "Back",
            WorkflowAction::Confirm => "Confirm",
            WorkflowAction::CommitSucceeded => "CommitSucceeded",
            WorkflowAction::CommitFailed { .. } => "CommitFailed",
            WorkflowAction::Cancel => "Cancel",
            WorkflowAction::ConfirmCancel => "ConfirmCancel",
            WorkflowAction::DismissCancel => "DismissCancel",
            WorkflowAction::Acknowledge => "Acknowledge",
        }
    }
}

/// 状态转换产生的副作用（由会话层执行）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEffect {
    StartCommit,
    RequestRefresh,
    NotifySuccess,
    Close,
}

/// 一次转换的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effects: Vec<WorkflowEffect>,
}

impl Transition {
    fn to(state: WorkflowState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: WorkflowState, effects: Vec<WorkflowEffect>) -> Self {
        Self { state, effects }
    }
}

fn invalid(state: &WorkflowState, action: &WorkflowAction) -> WorkflowError {
    WorkflowError::InvalidTransition {
        from: state.current_step,
        action: action.name().to_string(),
    }
}

// ==========================================
// reduce - 纯函数状态转换
// ==========================================
// 非法动作返回错误，原状态保持不变
pub fn reduce(state: &WorkflowState, action: WorkflowAction) -> WorkflowResult<Transition> {
    // 提交进行中: 只接受提交结果
    if state.is_saving {
        return match action {
            WorkflowAction::CommitSucceeded => {
                let next = WorkflowState {
                    current_step: WorkflowStep::Completed,
                    is_saving: false,
                    commit_error: None,
                    ..state.clone()
                };
                Ok(Transition::with(next, vec![WorkflowEffect::RequestRefresh]))
            }
            WorkflowAction::CommitFailed { message } => {
                let next = WorkflowState {
                    is_saving: false,
                    commit_error: Some(message),
                    ..state.clone()
                };
                Ok(Transition::to(next))
            }
            _ => Err(WorkflowError::CommitInFlight),
        };
    }

    // 取消确认提示打开时: 只接受确认/撤销
    if state.cancel_prompt_open {
        return match action {
            WorkflowAction::ConfirmCancel => Ok(Transition::with(
                WorkflowState {
                    cancel_prompt_open: false,
                    ..state.clone()
                },
                vec![WorkflowEffect::Close],
            )),
            WorkflowAction::DismissCancel => Ok(Transition::to(WorkflowState {
                cancel_prompt_open: false,
                ..state.clone()
            })),
            other => Err(invalid(state, &other)),
        };
    }

    match (state.current_step, action) {
        // ===== SelectingDate =====
        (WorkflowStep::SelectingDate, WorkflowAction::DateSelected(data)) => {
            Ok(Transition::to(WorkflowState {
                current_step: WorkflowStep::Reviewing,
                selected_date_data: Some(data),
                commit_error: None,
                ..state.clone()
            }))
        }
        (WorkflowStep::SelectingDate, WorkflowAction::Cancel) => {
            Ok(Transition::with(state.clone(), vec![WorkflowEffect::Close]))
        }

        // ===== Reviewing =====
        (WorkflowStep::Reviewing, WorkflowAction::Back) => Ok(Transition::to(WorkflowState {
            // 保留选择，供日期选择器回显
            current_step: WorkflowStep::SelectingDate,
            ..state.clone()
        })),
        (WorkflowStep::Reviewing, WorkflowAction::Confirm) => Ok(Transition::to(WorkflowState {
            current_step: WorkflowStep::Confirming,
            ..state.clone()
        })),

        // ===== Confirming =====
        (WorkflowStep::Confirming, WorkflowAction::Back) => Ok(Transition::to(WorkflowState {
            current_step: WorkflowStep::Reviewing,
            commit_error: None,
            ..state.clone()
        })),
        (WorkflowStep::Confirming, WorkflowAction::Confirm) => Ok(Transition::with(
            WorkflowState {
                is_saving: true,
                commit_error: None,
                ..state.clone()
            },
            vec![WorkflowEffect::StartCommit],
        )),

        // ===== 取消（需确认） =====
        (WorkflowStep::Reviewing | WorkflowStep::Confirming, WorkflowAction::Cancel) => {
            Ok(Transition::to(WorkflowState {
                cancel_prompt_open: true,
                ..state.clone()
            }))
        }

        // ===== Completed =====
        (WorkflowStep::Completed, WorkflowAction::Acknowledge) => Ok(Transition::with(
            state.clone(),
            vec![WorkflowEffect::NotifySuccess, WorkflowEffect::Close],
        )),

        (_, other) => Err(invalid(state, &other)),
    }
}
