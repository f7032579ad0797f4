//! Delete Builder - 根据请求载荷构建 DELETE 语句

use super::{checked_field, checked_table, BindValue, SqlStatement};
use crate::db_pool::DbDriver;
use crate::error::{DynApiError, Result};
use crate::request::ActionRequest;

/// Delete Builder
///
/// 必须带主键条件，不存在无条件删除的路径。
pub struct DeleteBuilder<'a> {
    request: &'a ActionRequest,
}

impl<'a> DeleteBuilder<'a> {
    pub fn new(request: &'a ActionRequest) -> Self {
        Self { request }
    }

    /// 构建 DELETE 语句
    ///
    /// `DELETE FROM <table> WHERE <pk> = ?`
    pub fn build(&self, driver: DbDriver) -> Result<SqlStatement> {
        let table = checked_table(driver, &self.request.table)?;

        let (pk_field, pk_value) = match (
            self.request.primary_key_field.as_deref().filter(|f| !f.is_empty()),
            &self.request.primary_key_value,
        ) {
            (Some(field), Some(value)) => (field, value),
            _ => {
                return Err(DynApiError::validation(
                    "Primary key field and value are required for delete operation.",
                ))
            }
        };

        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            table,
            checked_field(driver, pk_field)?
        );
        let binds = vec![BindValue::from_json(pk_field, pk_value)?];

        Ok(SqlStatement::new(sql, binds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(sql: &str) -> String {
        sql.replace('`', "").replace('\"', "")
    }

    fn request(body: serde_json::Value) -> ActionRequest {
        ActionRequest::from_body("users", body.to_string().as_bytes())
    }

    #[test]
    fn test_delete_sql_shape() {
        let request = request(json!({"primary_key_field": "id", "primary_key_value": 9}));
        let stmt = DeleteBuilder::new(&request).build(DbDriver::MySql).unwrap();
        assert_eq!(normalize(&stmt.sql), "DELETE FROM users WHERE id = ?");
        assert_eq!(stmt.binds, vec![BindValue::Int64(9)]);
    }

    #[test]
    fn test_delete_missing_required_fields() {
        let bodies = [
            json!({}),
            json!({"primary_key_field": "id"}),
            json!({"primary_key_value": 9}),
            json!({"primary_key_field": "id", "primary_key_value": null}),
            json!({"primary_key_field": "", "primary_key_value": 9}),
        ];
        for body in bodies {
            let request = request(body);
            let err = DeleteBuilder::new(&request)
                .build(DbDriver::MySql)
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Primary key field and value are required for delete operation."
            );
        }
    }

    #[test]
    fn test_delete_string_pk_value() {
        let request = request(json!({"primary_key_field": "code", "primary_key_value": "A-1"}));
        let stmt = DeleteBuilder::new(&request)
            .build(DbDriver::Sqlite)
            .unwrap();
        assert_eq!(stmt.binds, vec![BindValue::String("A-1".to_string())]);
    }
}
