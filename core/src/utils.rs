//! 工具函数模块

use crate::db_pool::DbDriver;

/// 标识符最大长度（与主流数据库的 64 字符上限一致）
const MAX_IDENTIFIER_LEN: usize = 64;

/// 验证表名是否安全
pub fn is_safe_table_name(name: &str) -> bool {
    is_safe_identifier(name)
}

/// 验证字段名是否安全
pub fn is_safe_field_name(name: &str) -> bool {
    is_safe_identifier(name)
}

/// 标识符规则：首字符为 ASCII 字母或下划线，其余为 ASCII 字母、数字或下划线。
/// 调用方提供的表名、列名在拼入 SQL 之前必须通过此检查。
fn is_safe_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_IDENTIFIER_LEN {
        return false;
    }
    let bytes = name.as_bytes();
    if !(bytes[0].is_ascii_alphabetic() || bytes[0] == b'_') {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// 转义 SQL 标识符
pub fn escape_identifier(driver: DbDriver, name: &str) -> String {
    match driver {
        DbDriver::MySql => format!("`{}`", name),
        DbDriver::Postgres => format!("\"{}\"", name),
        DbDriver::Sqlite => format!("\"{}\"", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_identifiers() {
        assert!(is_safe_table_name("users"));
        assert!(is_safe_table_name("user_profile"));
        assert!(is_safe_table_name("_tmp"));
        assert!(is_safe_field_name("created_at2"));
    }

    #[test]
    fn test_unsafe_identifiers() {
        assert!(!is_safe_table_name(""));
        assert!(!is_safe_table_name("1users"));
        assert!(!is_safe_table_name("users; DROP TABLE users"));
        assert!(!is_safe_field_name("name`"));
        assert!(!is_safe_field_name("na me"));
        assert!(!is_safe_field_name("name\"--"));
        assert!(!is_safe_table_name(&"a".repeat(65)));
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier(DbDriver::MySql, "user"), "`user`");
        assert_eq!(escape_identifier(DbDriver::Postgres, "user"), "\"user\"");
        assert_eq!(escape_identifier(DbDriver::Sqlite, "user"), "\"user\"");
    }
}
