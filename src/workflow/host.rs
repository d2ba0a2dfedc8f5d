// ==========================================
// 预订改期引擎 - 宿主回调
// ==========================================
// 职责: 流程通知宿主（关闭 / 成功 / 刷新缓存）
// 说明: 流程层定义 trait，宿主（页面/服务）实现
// ==========================================

use std::sync::Arc;

/// 宿主回调 Trait
///
/// - `on_close`: 流程关闭（取消、确认提示后取消、完成后确认、阻断提示后确认）
/// - `on_success`: 改期完成后用户确认（可选，默认不处理）
/// - `request_refresh`: 提交成功后请求宿主刷新预订/付款计划缓存
pub trait WorkflowHost: Send + Sync {
    fn on_close(&self);

    fn on_success(&self) {
        tracing::debug!("宿主未处理 on_success");
    }

    fn request_refresh(&self);
}

/// 空操作宿主
///
/// 用于不需要回调的场景（如预览工具、单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpHost;

impl WorkflowHost for NoOpHost {
    fn on_close(&self) {
        tracing::debug!("NoOpHost: 跳过 on_close");
    }

    fn request_refresh(&self) {
        tracing::debug!("NoOpHost: 跳过 request_refresh");
    }
}

impl<T: WorkflowHost + ?Sized> WorkflowHost for Arc<T> {
    fn on_close(&self) {
        (**self).on_close()
    }

    fn on_success(&self) {
        (**self).on_success()
    }

    fn request_refresh(&self) {
        (**self).request_refresh()
    }
}
