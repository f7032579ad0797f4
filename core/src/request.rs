//! 请求模型
//!
//! 表名来自 URL 路径，其余字段来自 JSON body。body 解析失败时按空对象处理，
//! 由各动作的必填校验给出具体错误。

use serde::Deserialize;
use serde_json::{Map, Value};

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert,
    Update,
    Delete,
    Get,
}

impl Action {
    /// 大小写不敏感解析，无法识别的动作返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "insert" => Some(Action::Insert),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "get" => Some(Action::Get),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Insert => "insert",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Get => "get",
        }
    }
}

/// 单次请求的载荷
///
/// `data` / `filters` 使用保序 Map，键的出现顺序决定生成 SQL 的子句顺序。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionRequest {
    /// 目标表名（由 URL 注入，不从 body 读取）
    #[serde(skip)]
    pub table: String,

    /// 主键列名
    #[serde(default)]
    pub primary_key_field: Option<String>,

    /// 主键值（标量）
    #[serde(default)]
    pub primary_key_value: Option<Value>,

    /// INSERT / UPDATE 数据
    #[serde(default)]
    pub data: Option<Map<String, Value>>,

    /// GET 的等值过滤条件
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,

    /// GET 的返回条数上限
    #[serde(default)]
    pub limit: Option<u64>,
}

impl ActionRequest {
    /// 仅指定表名的空请求
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    /// 从 URL 表名与原始 body 构造请求
    ///
    /// body 不是合法 JSON 对象、或字段类型不符时，整体退化为空载荷，
    /// 与「畸形 body 视为空对象」的约定一致。
    pub fn from_body(table: impl Into<String>, body: &[u8]) -> Self {
        let value: Value = if body.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()))
        };
        let mut request: ActionRequest = serde_json::from_value(value).unwrap_or_default();
        request.table = table.into();
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_parse_case_insensitive() {
        assert_eq!(Action::parse("insert"), Some(Action::Insert));
        assert_eq!(Action::parse("INSERT"), Some(Action::Insert));
        assert_eq!(Action::parse("Get"), Some(Action::Get));
        assert_eq!(Action::parse("upsert"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_from_body_injects_table() {
        let body = json!({"data": {"name": "Ann", "age": 30}}).to_string();
        let request = ActionRequest::from_body("users", body.as_bytes());
        assert_eq!(request.table, "users");
        let data = request.data.unwrap();
        assert_eq!(data.len(), 2);
        // 保序 Map：键顺序与 body 中一致
        let keys: Vec<&String> = data.keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
    }

    #[test]
    fn test_from_body_malformed_is_empty() {
        let request = ActionRequest::from_body("users", b"not json at all");
        assert_eq!(request.table, "users");
        assert!(request.data.is_none());
        assert!(request.primary_key_field.is_none());
        assert!(request.limit.is_none());
    }

    #[test]
    fn test_from_body_empty_body() {
        let request = ActionRequest::from_body("users", b"");
        assert_eq!(request.table, "users");
        assert!(request.filters.is_none());
    }

    #[test]
    fn test_from_body_null_pk_value_is_absent() {
        let body = json!({"primary_key_field": "id", "primary_key_value": null}).to_string();
        let request = ActionRequest::from_body("users", body.as_bytes());
        assert_eq!(request.primary_key_field.as_deref(), Some("id"));
        assert!(request.primary_key_value.is_none());
    }

    #[test]
    fn test_from_body_wrong_shape_is_empty() {
        // data 不是对象：整体退化为空载荷，后续必填校验给出动作相关错误
        let body = json!({"data": [1, 2, 3]}).to_string();
        let request = ActionRequest::from_body("users", body.as_bytes());
        assert!(request.data.is_none());
    }
}
