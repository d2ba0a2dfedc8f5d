// ==========================================
// 预订改期引擎 - 配置层
// ==========================================
// 职责: 改期策略配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod policy_profile;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use policy_profile::DateChangePolicyConfig;
