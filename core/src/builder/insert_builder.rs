//! Insert Builder - 根据请求载荷构建 INSERT 语句

use super::{checked_field, checked_table, BindValue, SqlStatement};
use crate::db_pool::DbDriver;
use crate::error::{DynApiError, Result};
use crate::request::ActionRequest;

/// PostgreSQL 无 last_insert_id，RETURNING 的主键列在请求未指定时取约定列名
const DEFAULT_PK: &str = "id";

/// Insert Builder
///
/// 列与占位符的顺序跟随 `data` 中键的出现顺序。
pub struct InsertBuilder<'a> {
    request: &'a ActionRequest,
}

impl<'a> InsertBuilder<'a> {
    pub fn new(request: &'a ActionRequest) -> Self {
        Self { request }
    }

    /// 构建 INSERT 语句
    ///
    /// `INSERT INTO <table> (<cols>) VALUES (?, ...)`，PostgreSQL 追加
    /// `RETURNING <pk>` 以取得插入 ID。
    pub fn build(&self, driver: DbDriver) -> Result<SqlStatement> {
        let table = checked_table(driver, &self.request.table)?;

        let values = match &self.request.data {
            Some(map) if !map.is_empty() => map,
            _ => {
                return Err(DynApiError::validation(
                    "Data is required for insert operation.",
                ))
            }
        };

        let mut columns = Vec::with_capacity(values.len());
        let mut binds = Vec::with_capacity(values.len());
        for (field, value) in values {
            columns.push(checked_field(driver, field)?);
            binds.push(BindValue::from_json(field, value)?);
        }

        let placeholders = vec!["?"; binds.len()].join(", ");
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        );

        if driver == DbDriver::Postgres {
            let pk = self
                .request
                .primary_key_field
                .as_deref()
                .filter(|f| !f.is_empty())
                .unwrap_or(DEFAULT_PK);
            sql.push_str(&format!(" RETURNING {}", checked_field(driver, pk)?));
        }

        Ok(SqlStatement::new(sql, binds))
    }
}
