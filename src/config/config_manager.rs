// ==========================================
// 预订改期引擎 - 配置管理器
// ==========================================
// 职责: 改期策略配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::policy_profile::DateChangePolicyConfig;
use crate::db::{ensure_config_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在则创建，并补齐 config_kv 表）
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            ensure_config_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::debug!(config_key = key, value, "配置已写入");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    // ===== 改期策略配置 =====

    /// 加载改期策略
    ///
    /// 缺失的键使用默认值；存在但无法解析的值视为错误（不静默回退）
    pub fn load_policy(&self) -> Result<DateChangePolicyConfig, Box<dyn Error>> {
        let defaults = DateChangePolicyConfig::default();

        let policy = DateChangePolicyConfig {
            additional_payment_due_hours: self.get_parsed(
                config_keys::ADDITIONAL_PAYMENT_DUE_HOURS,
                defaults.additional_payment_due_hours,
            )?,
            refund_min_business_days: self.get_parsed(
                config_keys::REFUND_MIN_BUSINESS_DAYS,
                defaults.refund_min_business_days,
            )?,
            refund_max_business_days: self.get_parsed(
                config_keys::REFUND_MAX_BUSINESS_DAYS,
                defaults.refund_max_business_days,
            )?,
            child_price_fallback_ratio: self.get_parsed::<Decimal>(
                config_keys::CHILD_PRICE_FALLBACK_RATIO,
                defaults.child_price_fallback_ratio,
            )?,
        };

        policy.validate()?;
        tracing::debug!(?policy, "改期策略已加载");
        Ok(policy)
    }

    /// 读取并解析配置值，不存在时返回默认值
    fn get_parsed<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key)? {
            Some(raw) => raw.trim().parse::<T>().map_err(|e| {
                Box::<dyn Error>::from(format!(
                    "配置值无效: key={}, value={}, error={}",
                    key, raw, e
                ))
            }),
            None => Ok(default),
        }
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 现金补缴
    pub const ADDITIONAL_PAYMENT_DUE_HOURS: &str = "date_change.additional_payment_due_hours";

    // 退款处理周期
    pub const REFUND_MIN_BUSINESS_DAYS: &str = "date_change.refund_min_business_days";
    pub const REFUND_MAX_BUSINESS_DAYS: &str = "date_change.refund_max_business_days";

    // 儿童价兜底比例
    pub const CHILD_PRICE_FALLBACK_RATIO: &str = "date_change.child_price_fallback_ratio";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_load_policy_defaults() {
        let manager = in_memory_manager();
        let policy = manager.load_policy().unwrap();
        assert_eq!(policy, DateChangePolicyConfig::default());
        assert_eq!(policy.additional_payment_due_hours, 48);
        assert_eq!(policy.child_price_fallback_ratio, Decimal::new(5, 1));
    }

    #[test]
    fn test_load_policy_overrides() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::ADDITIONAL_PAYMENT_DUE_HOURS, "72")
            .unwrap();
        manager
            .set_global_config_value(config_keys::CHILD_PRICE_FALLBACK_RATIO, "0.75")
            .unwrap();

        let policy = manager.load_policy().unwrap();
        assert_eq!(policy.additional_payment_due_hours, 72);
        assert_eq!(policy.child_price_fallback_ratio, Decimal::new(75, 2));
        assert_eq!(policy.refund_min_business_days, 5);
    }

    #[test]
    fn test_load_policy_rejects_invalid_values() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::REFUND_MIN_BUSINESS_DAYS, "abc")
            .unwrap();
        assert!(manager.load_policy().is_err());

        manager
            .set_global_config_value(config_keys::REFUND_MIN_BUSINESS_DAYS, "9")
            .unwrap();
        // min > max(7)
        assert!(manager.load_policy().is_err());
    }

    #[test]
    fn test_config_snapshot_contains_overrides() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::REFUND_MAX_BUSINESS_DAYS, "10")
            .unwrap();
        let snapshot = manager.get_config_snapshot().unwrap();
        let map: HashMap<String, String> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(
            map.get(config_keys::REFUND_MAX_BUSINESS_DAYS).map(String::as_str),
            Some("10")
        );
    }
}
