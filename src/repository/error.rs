// ==========================================
// 预订改期引擎 - 外部调用错误类型
// ==========================================
// 外部接口约定: { success: true, data } | { success: false, error }
// - Rejected: 对方返回了结构化失败（带 error 文案）
// - Transport: 调用本身失败/异常（无结构化文案）
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 外部调用错误
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("外部服务拒绝: {message}")]
    Rejected { message: String },

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn rejected(message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            message: message.into(),
        }
    }

    /// 结构化失败文案（非结构化异常返回 None）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected { message } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type GatewayResult<T> = Result<T, GatewayError>;
