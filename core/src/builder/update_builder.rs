//! Update Builder - 根据请求载荷构建 UPDATE 语句

use super::{checked_field, checked_table, BindValue, SqlStatement};
use crate::db_pool::DbDriver;
use crate::error::{DynApiError, Result};
use crate::request::ActionRequest;

/// Update Builder
///
/// SET 子句顺序跟随 `data` 中键的出现顺序，主键条件的绑定值排在最后。
pub struct UpdateBuilder<'a> {
    request: &'a ActionRequest,
}

impl<'a> UpdateBuilder<'a> {
    pub fn new(request: &'a ActionRequest) -> Self {
        Self { request }
    }

    /// 构建 UPDATE 语句
    ///
    /// `UPDATE <table> SET <col> = ?, ... WHERE <pk> = ?`
    pub fn build(&self, driver: DbDriver) -> Result<SqlStatement> {
        let table = checked_table(driver, &self.request.table)?;

        let (pk_field, pk_value, values) = match (
            self.request.primary_key_field.as_deref().filter(|f| !f.is_empty()),
            &self.request.primary_key_value,
            &self.request.data,
        ) {
            (Some(field), Some(value), Some(data)) if !data.is_empty() => (field, value, data),
            _ => {
                return Err(DynApiError::validation(
                    "Primary key field, value, and data are required for update operation.",
                ))
            }
        };

        let mut set_parts = Vec::with_capacity(values.len());
        let mut binds = Vec::with_capacity(values.len() + 1);
        for (field, value) in values {
            set_parts.push(format!("{} = ?", checked_field(driver, field)?));
            binds.push(BindValue::from_json(field, value)?);
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table,
            set_parts.join(", "),
            checked_field(driver, pk_field)?
        );
        binds.push(BindValue::from_json(pk_field, pk_value)?);

        Ok(SqlStatement::new(sql, binds))
    }
}
