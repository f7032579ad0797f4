//! CRUD Builder 模块
//!
//! 每个动作一个 Builder：校验该动作的必填字段，产出带规范 ? 占位符的
//! SqlStatement。标识符（表名、列名）先通过安全校验再转义拼入 SQL，
//! 值一律走绑定参数。

pub mod bind_value;
pub mod delete_builder;
pub mod insert_builder;
pub mod select_builder;
pub mod update_builder;

pub use bind_value::BindValue;
pub use delete_builder::DeleteBuilder;
pub use insert_builder::InsertBuilder;
pub use select_builder::SelectBuilder;
pub use update_builder::UpdateBuilder;

use crate::db_pool::DbDriver;
use crate::error::{DynApiError, Result};
use crate::utils::{escape_identifier, is_safe_field_name, is_safe_table_name};

/// 一次请求生成的语句与绑定参数
///
/// 每次请求重新构建，不做缓存；占位符统一为 ?，执行时再按驱动转换。
#[derive(Debug, Clone)]
pub struct SqlStatement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>, binds: Vec<BindValue>) -> Self {
        Self {
            sql: sql.into(),
            binds,
        }
    }
}

/// 校验并转义表名
pub(crate) fn checked_table(driver: DbDriver, name: &str) -> Result<String> {
    if !is_safe_table_name(name) {
        return Err(DynApiError::validation(format!(
            "Invalid table name: '{}'.",
            name
        )));
    }
    Ok(escape_identifier(driver, name))
}

/// 校验并转义列名
pub(crate) fn checked_field(driver: DbDriver, name: &str) -> Result<String> {
    if !is_safe_field_name(name) {
        return Err(DynApiError::validation(format!(
            "Invalid column name: '{}'.",
            name
        )));
    }
    Ok(escape_identifier(driver, name))
}
