//! 响应封装
//!
//! 所有动作共用的统一响应结构，未赋值的字段不出现在 JSON 中。

use serde::Serialize;
use serde_json::{Map, Value};

/// 响应状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// 统一响应结构
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Map<String, Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<i64>,
}

impl ResponseEnvelope {
    /// 插入成功
    pub fn inserted(id: i64) -> Self {
        Self {
            status: Status::Success,
            message: Some("Data inserted successfully.".to_string()),
            count: None,
            data: None,
            inserted_id: Some(id),
        }
    }

    /// 仅带消息的成功响应
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            count: None,
            data: None,
            inserted_id: None,
        }
    }

    /// 查询结果，count 恒等于 data 的长度
    pub fn rows(rows: Vec<Map<String, Value>>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            count: Some(rows.len()),
            data: Some(rows),
            inserted_id: None,
        }
    }

    /// 零行生效的软错误：封装为 error 状态，但 HTTP 状态仍为 200
    pub fn soft_error(message: impl Into<String>) -> Self {
        Self::error_message(message)
    }

    /// 错误响应体
    pub fn error_message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            count: None,
            data: None,
            inserted_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inserted_serialization() {
        let envelope = ResponseEnvelope::inserted(42);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "Data inserted successfully.");
        assert_eq!(value["inserted_id"], 42);
        // 未赋值的字段不出现
        assert!(value.get("count").is_none());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_rows_count_matches_data_len() {
        let mut row = Map::new();
        row.insert("id".to_string(), json!(1));
        let envelope = ResponseEnvelope::rows(vec![row]);
        assert!(envelope.is_success());
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_soft_error_serialization() {
        let envelope = ResponseEnvelope::soft_error("No record updated.");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "No record updated.");
        assert!(value.get("inserted_id").is_none());
    }
}
