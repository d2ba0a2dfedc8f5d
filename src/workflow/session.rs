// ==========================================
// 预订改期引擎 - 改期会话
// ==========================================
// 职责: 持有流程状态，编排两个外部调用（季节查询 / 改期提交），
//       应用截止期判定、季节价格计算、付款影响分类
// ==========================================
// 入口判定（仅在打开时执行一次）:
// 1) 付款计划不允许改期 → 阻断提示，只能确认关闭
// 2) 已过改期截止 → 阻断提示，只能确认关闭
// 3) 其他 → 进入 SelectingDate
// ==========================================
// 并发约束:
// - 季节查询只在首次加载与显式重试时发出，加载中不重复发请求
// - 提交进行中（is_saving）不接受任何其他动作，不支持中途取消
// - confirm 的 future 在提交返回前被丢弃时按失败记录，释放 is_saving
// - 不自动重试提交；失败后保留选择，用户可重试或回退
// ==========================================

use crate::config::DateChangePolicyConfig;
use crate::domain::money::PriceDelta;
use crate::domain::payment_plan::PaymentPlan;
use crate::domain::reservation::{Product, Reservation};
use crate::domain::season::Season;
use crate::domain::selection::SelectedDateData;
use crate::domain::types::{WorkflowStep, WORKFLOW_STEP_COUNT};
use crate::engine::deadline::{DeadlinePolicyEvaluator, EntryGate};
use crate::engine::payment_impact::{ImpactInput, PaymentImpact, PaymentImpactClassifier};
use crate::engine::season_price::{DateValidationError, SeasonPriceCalculator, SeasonQuote};
use crate::i18n::{t, t_with_args};
use crate::repository::error::GatewayResult;
use crate::repository::reservation_gateway::{DateChangeRequest, ReservationDateChanger};
use crate::repository::season_catalog::SeasonCatalog;
use crate::workflow::clock::{Clock, SystemClock};
use crate::workflow::error::{WorkflowError, WorkflowResult};
use crate::workflow::host::WorkflowHost;
use crate::workflow::selection::{SeasonLoadState, SeasonSelection};
use crate::workflow::state::{reduce, Transition, WorkflowAction, WorkflowEffect, WorkflowState};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 入参
// ==========================================

/// 调用方传入的只读数据
#[derive(Debug, Clone)]
pub struct DateChangeContext {
    pub reservation: Reservation,
    pub payment_plan: PaymentPlan,
    pub product: Product,
}

/// 会话依赖
#[derive(Clone)]
pub struct WorkflowDeps {
    pub season_catalog: Arc<dyn SeasonCatalog>,
    pub date_changer: Arc<dyn ReservationDateChanger>,
    pub host: Arc<dyn WorkflowHost>,
    pub clock: Arc<dyn Clock>,
    pub policy: DateChangePolicyConfig,
}

impl WorkflowDeps {
    /// 系统时钟 + 默认策略
    pub fn new(
        season_catalog: Arc<dyn SeasonCatalog>,
        date_changer: Arc<dyn ReservationDateChanger>,
        host: Arc<dyn WorkflowHost>,
    ) -> Self {
        Self {
            season_catalog,
            date_changer,
            host,
            clock: Arc::new(SystemClock),
            policy: DateChangePolicyConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: DateChangePolicyConfig) -> Self {
        self.policy = policy;
        self
    }
}

// ==========================================
// 出参（供界面渲染）
// ==========================================

/// 阻断原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    NotPermitted,
    DeadlinePassed { deadline_date: NaiveDate },
}

/// 阻断提示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedNotice {
    pub reason: BlockReason,
    pub title: String,
    pub description: String,
}

/// 当前可用操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailableAction {
    SelectSeason,
    ChooseDate,
    RetrySeasons,
    Back,
    Confirm,
    Cancel,
    ConfirmCancel,
    DismissCancel,
    Acknowledge,
}

/// 步骤条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepIndicator {
    pub step: WorkflowStep,
    pub index: usize,
    pub total: usize,
    pub label: String,
}

/// 新旧价格对比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceComparison {
    pub currency: String,
    pub current_date: NaiveDate,
    pub new_date: NaiveDate,
    pub current_price_per_person: Decimal,
    pub new_price_per_person: Decimal,
    pub current_price_per_kid: Option<Decimal>,
    pub new_price_per_kid: Option<Decimal>,
    pub delta: PriceDelta,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Completed,
    Failed { message: String },
}

// ==========================================
// DateChangeWorkflow - 改期会话
// ==========================================
pub struct DateChangeWorkflow {
    session_id: Uuid,
    context: DateChangeContext,
    deps: WorkflowDeps,
    gate: EntryGate,
    /// 阻断或已关闭时为 None
    state: Option<WorkflowState>,
    selection: SeasonSelection,
    calculator: SeasonPriceCalculator,
    classifier: PaymentImpactClassifier,
    /// StartCommit 副作用组装的请求，由 begin_commit 取走
    pending_commit: Option<DateChangeRequest>,
    closed: bool,
}

/// confirm 等待提交期间持有会话；未解除即被丢弃时放弃提交
struct CommitGuard<'a> {
    workflow: &'a mut DateChangeWorkflow,
    armed: bool,
}

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.workflow.abandon_commit() {
            warn!(error = %e, "放弃改期提交失败");
        }
    }
}

impl DateChangeWorkflow {
    /// 打开改期会话（执行入口判定）
    pub fn open(context: DateChangeContext, deps: WorkflowDeps) -> Self {
        let session_id = Uuid::new_v4();
        let gate = DeadlinePolicyEvaluator::new().entry_gate(
            &context.payment_plan,
            context.reservation.travel_date,
            deps.clock.now(),
        );

        info!(
            %session_id,
            reservation_id = %context.reservation.id,
            gate = ?gate,
            "打开改期会话"
        );

        let state = gate.is_permitted().then(WorkflowState::initial);
        let calculator = SeasonPriceCalculator::with_policy(&deps.policy);
        let classifier = PaymentImpactClassifier::with_policy(deps.policy.clone());

        Self {
            session_id,
            context,
            deps,
            gate,
            state,
            selection: SeasonSelection::new(),
            calculator,
            classifier,
            pending_commit: None,
            closed: false,
        }
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn context(&self) -> &DateChangeContext {
        &self.context
    }

    pub fn gate(&self) -> &EntryGate {
        &self.gate
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn state(&self) -> Option<&WorkflowState> {
        self.state.as_ref()
    }

    pub fn current_step(&self) -> Option<WorkflowStep> {
        self.state.as_ref().map(|s| s.current_step)
    }

    pub fn selection(&self) -> &SeasonSelection {
        &self.selection
    }

    /// 阻断提示（入口判定未通过时）
    pub fn blocked_notice(&self) -> Option<BlockedNotice> {
        match self.gate {
            EntryGate::Permitted { .. } => None,
            EntryGate::NotPermitted => Some(BlockedNotice {
                reason: BlockReason::NotPermitted,
                title: t("notice.not_permitted.title"),
                description: t("notice.not_permitted.description"),
            }),
            EntryGate::DeadlinePassed { deadline_date } => {
                let deadline = deadline_date.format("%Y-%m-%d").to_string();
                Some(BlockedNotice {
                    reason: BlockReason::DeadlinePassed { deadline_date },
                    title: t("notice.deadline_passed.title"),
                    description: t_with_args(
                        "notice.deadline_passed.description",
                        &[("deadline", deadline.as_str())],
                    ),
                })
            }
        }
    }

    pub fn step_indicator(&self) -> Option<StepIndicator> {
        let step = self.current_step()?;
        Some(StepIndicator {
            step,
            index: step.index(),
            total: WORKFLOW_STEP_COUNT,
            label: t(step.label_key()),
        })
    }

    /// 取消确认提示文案
    pub fn cancel_prompt(&self) -> Option<String> {
        self.state
            .as_ref()
            .filter(|s| s.cancel_prompt_open)
            .map(|_| t("workflow.cancel_prompt"))
    }

    /// 当前可用操作（提交进行中不提供确认）
    pub fn available_actions(&self) -> Vec<AvailableAction> {
        if self.closed {
            return Vec::new();
        }
        let state = match &self.state {
            Some(state) => state,
            None => return vec![AvailableAction::Acknowledge],
        };
        if state.is_saving {
            return Vec::new();
        }
        if state.cancel_prompt_open {
            return vec![AvailableAction::ConfirmCancel, AvailableAction::DismissCancel];
        }

        match state.current_step {
            WorkflowStep::SelectingDate => match self.selection.load_state() {
                SeasonLoadState::Failed { .. } => {
                    vec![AvailableAction::RetrySeasons, AvailableAction::Cancel]
                }
                SeasonLoadState::Loaded { .. } => {
                    let mut actions = vec![AvailableAction::SelectSeason];
                    if self.selection.selected_season().is_some() {
                        actions.push(AvailableAction::ChooseDate);
                    }
                    actions.push(AvailableAction::Cancel);
                    actions
                }
                _ => vec![AvailableAction::Cancel],
            },
            WorkflowStep::Reviewing | WorkflowStep::Confirming => vec![
                AvailableAction::Back,
                AvailableAction::Confirm,
                AvailableAction::Cancel,
            ],
            WorkflowStep::Completed => vec![AvailableAction::Acknowledge],
        }
    }

    /// 可选季节及其报价
    ///
    /// 报价溢出的季节不展示
    pub fn season_quotes(&self) -> Vec<(&Season, SeasonQuote)> {
        let party = &self.context.reservation.party;
        self.selection
            .seasons()
            .iter()
            .filter_map(|season| match self.calculator.quote(season, party) {
                Ok(quote) => Some((season, quote)),
                Err(e) => {
                    warn!(session_id = %self.session_id, error = %e, "季节报价无法计算，已隐藏");
                    None
                }
            })
            .collect()
    }

    /// 最近一次选日期的校验提示
    pub fn validation_message(&self) -> Option<String> {
        self.selection
            .validation_error()
            .map(DateValidationError::message)
    }

    /// 季节列表提示：无可选季节 / 加载失败
    pub fn season_notice(&self) -> Option<String> {
        match self.selection.load_state() {
            SeasonLoadState::Empty => Some(t("season.empty")),
            SeasonLoadState::Failed { message } => Some(message.clone()),
            _ => None,
        }
    }

    /// 所选季节的可选日期范围
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let season = self.selection.selected_season()?;
        self.calculator.date_bounds(season, self.deps.clock.today())
    }

    fn selected_date_data(&self) -> Option<&SelectedDateData> {
        self.state.as_ref()?.selected_date_data.as_ref()
    }

    /// 付款影响（已选定新日期后可用）
    pub fn payment_impact(&self) -> Option<PaymentImpact> {
        let data = self.selected_date_data()?;
        let reservation = &self.context.reservation;
        let plan = &self.context.payment_plan;

        Some(self.classifier.classify(&ImpactInput {
            current_total: reservation.total_price,
            new_total: data.new_total_price,
            plan_type: plan.plan_type,
            installments: &plan.installments,
            currency: &reservation.currency,
        }))
    }

    /// 新旧价格对比（已选定新日期后可用）
    pub fn price_comparison(&self) -> Option<PriceComparison> {
        let data = self.selected_date_data()?;
        let reservation = &self.context.reservation;
        let has_children = reservation.party.has_children();

        Some(PriceComparison {
            currency: reservation.currency.clone(),
            current_date: reservation.travel_date,
            new_date: data.date,
            current_price_per_person: reservation.price_per_person,
            new_price_per_person: data.price_per_person,
            current_price_per_kid: reservation.price_per_kid.filter(|_| has_children),
            new_price_per_kid: has_children.then_some(data.price_per_kid),
            delta: PriceDelta::new(reservation.total_price, data.new_total_price),
        })
    }

    // ==========================================
    // SelectingDate
    // ==========================================

    /// 首次加载季节列表（已加载过则直接返回当前状态）
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn load_seasons(&mut self) -> WorkflowResult<&SeasonLoadState> {
        self.require_step(WorkflowStep::SelectingDate, "LoadSeasons")?;
        if *self.selection.load_state() != SeasonLoadState::Idle {
            return Ok(self.selection.load_state());
        }
        self.fetch_seasons().await
    }

    /// 加载失败后重试（仅 Failed 状态下发请求）
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn retry_seasons(&mut self) -> WorkflowResult<&SeasonLoadState> {
        self.require_step(WorkflowStep::SelectingDate, "RetrySeasons")?;
        if !matches!(self.selection.load_state(), SeasonLoadState::Failed { .. }) {
            return Ok(self.selection.load_state());
        }
        self.fetch_seasons().await
    }

    async fn fetch_seasons(&mut self) -> WorkflowResult<&SeasonLoadState> {
        if !self.selection.begin_load() {
            return Ok(self.selection.load_state());
        }

        let product_id = self.context.product.id.clone();
        let result = self.deps.season_catalog.get_seasons(&product_id).await;
        match &result {
            Ok(seasons) => debug!(product_id, count = seasons.len(), "季节列表已返回"),
            Err(e) => warn!(product_id, error = %e, "季节列表加载失败"),
        }

        self.selection.finish_load(result, |e| {
            let detail = e.server_message().map_or_else(|| e.to_string(), str::to_string);
            t_with_args("season.load_failed", &[("error", detail.as_str())])
        });
        Ok(self.selection.load_state())
    }

    /// 选择季节（清空已选日期）
    pub fn select_season(&mut self, season_id: &str) -> WorkflowResult<()> {
        self.require_step(WorkflowStep::SelectingDate, "SelectSeason")?;
        if !matches!(self.selection.load_state(), SeasonLoadState::Loaded { .. }) {
            return Err(WorkflowError::SeasonsNotLoaded);
        }
        if !self.selection.select_season(season_id) {
            return Err(WorkflowError::SeasonNotFound(season_id.to_string()));
        }
        debug!(season_id, "已选择季节");
        Ok(())
    }

    /// 选择新日期；校验通过后计算价格并进入 Reviewing
    ///
    /// 校验失败不发生状态转换，错误同时记录在 selection 中供界面提示
    pub fn choose_date(&mut self, date: NaiveDate) -> WorkflowResult<SelectedDateData> {
        self.require_step(WorkflowStep::SelectingDate, "ChooseDate")?;
        let season = self
            .selection
            .selected_season()
            .cloned()
            .ok_or(WorkflowError::NoSeasonSelected)?;

        let today = self.deps.clock.today();
        match self
            .calculator
            .calculate(&season, &self.context.reservation.party, date, today)
        {
            Ok(data) => {
                self.selection.record_date(date, Ok(()));
                self.dispatch(WorkflowAction::DateSelected(data.clone()))?;
                Ok(data)
            }
            Err(e) => {
                self.selection.record_date(date, Err(e.clone()));
                Err(e.into())
            }
        }
    }

    // ==========================================
    // 导航
    // ==========================================

    pub fn back(&mut self) -> WorkflowResult<()> {
        self.dispatch(WorkflowAction::Back)
    }

    /// Reviewing → Confirming；Confirming → 提交改期
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn confirm(&mut self) -> WorkflowResult<WorkflowStep> {
        if self.active_state()?.current_step != WorkflowStep::Confirming {
            self.dispatch(WorkflowAction::Confirm)?;
            return self.active_state().map(|s| s.current_step);
        }

        let request = self.begin_commit()?;
        let date_changer = Arc::clone(&self.deps.date_changer);
        {
            let mut guard = CommitGuard {
                workflow: &mut *self,
                armed: true,
            };
            let result = date_changer.change_reservation_date(&request).await;
            guard.armed = false;
            guard.workflow.finish_commit(result)?;
        }
        self.active_state().map(|s| s.current_step)
    }

    /// 发起提交：置 is_saving，取走 StartCommit 组装的请求
    pub fn begin_commit(&mut self) -> WorkflowResult<DateChangeRequest> {
        self.require_step(WorkflowStep::Confirming, "Confirm")?;
        self.dispatch(WorkflowAction::Confirm)?;

        self.pending_commit
            .take()
            .ok_or(WorkflowError::InvalidTransition {
                from: WorkflowStep::Confirming,
                action: "Confirm".to_string(),
            })
    }

    /// 放弃进行中的提交（调用方不再等待结果）
    ///
    /// 对方是否已受理未知，按非结构化失败处理：保留选择，展示通用文案
    pub fn abandon_commit(&mut self) -> WorkflowResult<()> {
        if !self.active_state()?.is_saving {
            return Ok(());
        }
        warn!(session_id = %self.session_id, "改期提交被放弃，结果未知");
        self.pending_commit = None;
        self.dispatch(WorkflowAction::CommitFailed {
            message: t("workflow.commit_failed"),
        })
    }

    /// 记录提交结果
    ///
    /// 结构化失败展示对方文案，非结构化异常展示通用文案
    pub fn finish_commit(&mut self, result: GatewayResult<()>) -> WorkflowResult<CommitOutcome> {
        match result {
            Ok(()) => {
                self.dispatch(WorkflowAction::CommitSucceeded)?;
                info!("改期提交成功");
                Ok(CommitOutcome::Completed)
            }
            Err(e) => {
                warn!(error = %e, "改期提交失败");
                let message = e
                    .server_message()
                    .map_or_else(|| t("workflow.commit_failed"), str::to_string);
                self.dispatch(WorkflowAction::CommitFailed {
                    message: message.clone(),
                })?;
                Ok(CommitOutcome::Failed { message })
            }
        }
    }

    // ==========================================
    // 取消 / 关闭
    // ==========================================

    /// SelectingDate 直接关闭；Reviewing/Confirming 打开确认提示
    pub fn cancel(&mut self) -> WorkflowResult<()> {
        self.dispatch(WorkflowAction::Cancel)
    }

    pub fn confirm_cancel(&mut self) -> WorkflowResult<()> {
        self.dispatch(WorkflowAction::ConfirmCancel)
    }

    pub fn dismiss_cancel(&mut self) -> WorkflowResult<()> {
        self.dispatch(WorkflowAction::DismissCancel)
    }

    /// 阻断提示确认关闭 / 完成后确认关闭
    pub fn acknowledge(&mut self) -> WorkflowResult<()> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        if self.state.is_none() {
            info!(session_id = %self.session_id, "阻断提示已确认");
            self.close();
            return Ok(());
        }
        self.dispatch(WorkflowAction::Acknowledge)
    }

    // ==========================================
    // 内部
    // ==========================================

    fn gate_error(&self) -> WorkflowError {
        match self.gate {
            EntryGate::NotPermitted => WorkflowError::NotPermitted,
            EntryGate::DeadlinePassed { deadline_date } => WorkflowError::DeadlinePassed {
                deadline: deadline_date,
            },
            EntryGate::Permitted { .. } => WorkflowError::Closed,
        }
    }

    fn active_state(&self) -> WorkflowResult<&WorkflowState> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        self.state.as_ref().ok_or_else(|| self.gate_error())
    }

    fn require_step(&self, step: WorkflowStep, action: &str) -> WorkflowResult<()> {
        let state = self.active_state()?;
        if state.is_saving {
            return Err(WorkflowError::CommitInFlight);
        }
        if state.current_step != step || state.cancel_prompt_open {
            return Err(WorkflowError::InvalidTransition {
                from: state.current_step,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn dispatch(&mut self, action: WorkflowAction) -> WorkflowResult<()> {
        let current = self.active_state()?;
        let from = current.current_step;
        let action_name = action.name();

        let Transition { state, effects } = reduce(current, action)?;
        debug_assert!(state.check_invariants().is_ok());
        debug!(
            session_id = %self.session_id,
            action = action_name,
            %from,
            to = %state.current_step,
            "流程状态转换"
        );

        self.state = Some(state);
        for effect in effects {
            self.apply_effect(effect);
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: WorkflowEffect) {
        match effect {
            WorkflowEffect::StartCommit => self.prepare_commit(),
            WorkflowEffect::RequestRefresh => self.deps.host.request_refresh(),
            WorkflowEffect::NotifySuccess => self.deps.host.on_success(),
            WorkflowEffect::Close => self.close(),
        }
    }

    fn prepare_commit(&mut self) {
        let request = self.selected_date_data().map(|data| {
            DateChangeRequest::build(
                &self.context.reservation,
                &self.context.payment_plan,
                &self.context.product,
                data,
            )
        });
        if let Some(request) = &request {
            info!(
                reservation_id = %request.reservation_id,
                new_date = %request.new_date,
                new_total = %request.new_total_price,
                "提交改期"
            );
        }
        self.pending_commit = request;
    }

    fn close(&mut self) {
        self.closed = true;
        self.state = None;
        self.pending_commit = None;
        self.selection = SeasonSelection::new();
        info!(session_id = %self.session_id, "改期会话已关闭");
        self.deps.host.on_close();
    }
}
