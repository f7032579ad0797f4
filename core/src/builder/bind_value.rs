//! 绑定值：SQL 参数的标量表示

use serde_json::Value;

use crate::error::{DynApiError, Result};

/// 绑定值，用于安全地传递参数
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    String(String),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Null,
}

impl BindValue {
    /// 从 JSON 标量转换；数组 / 对象不是合法的绑定值
    pub fn from_json(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(BindValue::Null),
            Value::Bool(b) => Ok(BindValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(BindValue::Int64(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(BindValue::Float64(f))
                } else {
                    // 超出 i64/f64 表示范围的数字按字符串传递
                    Ok(BindValue::String(n.to_string()))
                }
            }
            Value::String(s) => Ok(BindValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(DynApiError::validation(format!(
                "Unsupported value type for field '{}'.",
                field
            ))),
        }
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::String(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::String(s.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(i: i64) -> Self {
        BindValue::Int64(i)
    }
}

impl From<i32> for BindValue {
    fn from(i: i32) -> Self {
        BindValue::Int64(i as i64)
    }
}

impl From<f64> for BindValue {
    fn from(f: f64) -> Self {
        BindValue::Float64(f)
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            BindValue::from_json("name", &json!("Ann")).unwrap(),
            BindValue::String("Ann".to_string())
        );
        assert_eq!(
            BindValue::from_json("age", &json!(30)).unwrap(),
            BindValue::Int64(30)
        );
        assert_eq!(
            BindValue::from_json("score", &json!(59.5)).unwrap(),
            BindValue::Float64(59.5)
        );
        assert_eq!(
            BindValue::from_json("active", &json!(true)).unwrap(),
            BindValue::Bool(true)
        );
        assert_eq!(
            BindValue::from_json("note", &json!(null)).unwrap(),
            BindValue::Null
        );
    }

    #[test]
    fn test_from_json_rejects_containers() {
        let err = BindValue::from_json("tags", &json!(["a", "b"])).unwrap_err();
        assert!(err.is_validation());
        let err = BindValue::from_json("meta", &json!({"k": 1})).unwrap_err();
        assert!(err.is_validation());
    }
}
