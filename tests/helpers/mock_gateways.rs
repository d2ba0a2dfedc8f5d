// ==========================================
// Mock 外部协作实现 - 用于集成测试
// ==========================================
// 按脚本依次返回结果；脚本耗尽后返回成功
// ==========================================

use async_trait::async_trait;
use reservation_date_change::domain::Season;
use reservation_date_change::repository::{
    DateChangeRequest, GatewayResult, ReservationDateChanger, SeasonCatalog,
};
use reservation_date_change::workflow::WorkflowHost;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ==========================================
// 季节查询
// ==========================================

#[derive(Default)]
pub struct ScriptedSeasonCatalog {
    responses: Mutex<VecDeque<GatewayResult<Vec<Season>>>>,
    calls: AtomicUsize,
}

impl ScriptedSeasonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(seasons: Vec<Season>) -> Self {
        let catalog = Self::new();
        catalog.push(Ok(seasons));
        catalog
    }

    pub fn push(&self, response: GatewayResult<Vec<Season>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeasonCatalog for ScriptedSeasonCatalog {
    async fn get_seasons(&self, _product_id: &str) -> GatewayResult<Vec<Season>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ==========================================
// 改期提交
// ==========================================

#[derive(Default)]
pub struct ScriptedDateChanger {
    responses: Mutex<VecDeque<GatewayResult<()>>>,
    requests: Mutex<Vec<DateChangeRequest>>,
}

impl ScriptedDateChanger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: GatewayResult<()>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// 已收到的提交请求
    pub fn requests(&self) -> Vec<DateChangeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReservationDateChanger for ScriptedDateChanger {
    async fn change_reservation_date(&self, request: &DateChangeRequest) -> GatewayResult<()> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// 永不返回的提交（模拟调用方超时放弃）
#[derive(Default)]
pub struct PendingDateChanger {
    calls: AtomicUsize,
}

impl PendingDateChanger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReservationDateChanger for PendingDateChanger {
    async fn change_reservation_date(&self, _request: &DateChangeRequest) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        Ok(())
    }
}

// ==========================================
// 宿主回调
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Close,
    Success,
    Refresh,
}

#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, event: HostEvent) -> usize {
        self.events().iter().filter(|e| **e == event).count()
    }
}

impl WorkflowHost for RecordingHost {
    fn on_close(&self) {
        self.events.lock().unwrap().push(HostEvent::Close);
    }

    fn on_success(&self) {
        self.events.lock().unwrap().push(HostEvent::Success);
    }

    fn request_refresh(&self) {
        self.events.lock().unwrap().push(HostEvent::Refresh);
    }
}
