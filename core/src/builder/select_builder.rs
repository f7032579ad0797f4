//! Select Builder - 根据请求载荷构建 SELECT 语句

use super::{checked_field, checked_table, BindValue, SqlStatement};
use crate::db_pool::DbDriver;
use crate::error::Result;
use crate::request::ActionRequest;

/// 未指定 limit 时的默认返回条数
pub const DEFAULT_LIMIT: u64 = 10;
/// limit 上限，防止无界扫描
pub const MAX_LIMIT: u64 = 1000;

/// Select Builder
///
/// 所有条件均为等值匹配：主键条件在前，filters 按键的出现顺序排在其后，
/// 用 AND 连接；LIMIT 恒为最后一个绑定参数。不带任何条件时是受限全表扫描。
pub struct SelectBuilder<'a> {
    request: &'a ActionRequest,
}

impl<'a> SelectBuilder<'a> {
    pub fn new(request: &'a ActionRequest) -> Self {
        Self { request }
    }

    /// 构建 SELECT 语句
    ///
    /// `SELECT * FROM <table> [WHERE <pk> = ? [AND <field> = ? ...]] LIMIT ?`
    pub fn build(&self, driver: DbDriver) -> Result<SqlStatement> {
        let table = checked_table(driver, &self.request.table)?;

        let mut where_parts = Vec::new();
        let mut binds = Vec::new();

        if let (Some(pk_field), Some(pk_value)) = (
            self.request.primary_key_field.as_deref().filter(|f| !f.is_empty()),
            &self.request.primary_key_value,
        ) {
            where_parts.push(format!("{} = ?", checked_field(driver, pk_field)?));
            binds.push(BindValue::from_json(pk_field, pk_value)?);
        }

        if let Some(filters) = &self.request.filters {
            for (field, value) in filters {
                where_parts.push(format!("{} = ?", checked_field(driver, field)?));
                binds.push(BindValue::from_json(field, value)?);
            }
        }

        let mut sql = format!("SELECT * FROM {}", table);
        if !where_parts.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));
        }

        let limit = self.request.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        sql.push_str(" LIMIT ?");
        binds.push(BindValue::Int64(limit as i64));

        Ok(SqlStatement::new(sql, binds))
    }
}
