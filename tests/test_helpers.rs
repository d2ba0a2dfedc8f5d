// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的配置库初始化、测试配置写入
// ==========================================

#![allow(dead_code)]

use reservation_date_change::db::{ensure_config_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    ensure_config_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 写入一组测试策略配置
pub fn insert_test_config(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let entries = [
        ("date_change.additional_payment_due_hours", "24"),
        ("date_change.refund_min_business_days", "3"),
        ("date_change.refund_max_business_days", "10"),
        ("date_change.child_price_fallback_ratio", "0.6"),
    ];

    for (key, value) in entries {
        conn.execute(
            "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
            params![key, value],
        )?;
    }
    Ok(())
}
