//! 语句执行器
//!
//! 将 SqlStatement 在 DbPool 上执行并整理结果。占位符在这里按驱动转换，
//! 绑定值通过 `apply_binds!` 逐个应用，调用方的值永远不会拼进 SQL 文本。

use serde_json::{Map, Value};
#[cfg(any(feature = "mysql", feature = "postgres", feature = "sqlite"))]
use sqlx::{Column, Row, TypeInfo};

use crate::builder::SqlStatement;
use crate::db_pool::{DbDriver, DbPool};
use crate::error::{DynApiError, Result};

/// 将绑定值依次应用到查询对象上
#[macro_export]
macro_rules! apply_binds {
    ($query:expr, $binds:expr) => {{
        let mut query = $query;
        for bind in $binds {
            query = match bind {
                $crate::builder::BindValue::String(s) => query.bind(s.clone()),
                $crate::builder::BindValue::Int64(i) => query.bind(*i),
                $crate::builder::BindValue::Float64(f) => query.bind(*f),
                $crate::builder::BindValue::Bool(b) => query.bind(*b),
                $crate::builder::BindValue::Null => query.bind(Option::<String>::None),
            };
        }
        query
    }};
}

/// 执行 INSERT，返回插入 ID
///
/// MySQL / SQLite 从执行结果读取 last insert id；PostgreSQL 依赖语句末尾的
/// RETURNING 子句（由 InsertBuilder 追加）。
pub async fn execute_insert(pool: &DbPool, stmt: &SqlStatement) -> Result<i64> {
    let sql = pool.convert_sql(&stmt.sql);
    match pool.driver() {
        #[cfg(feature = "mysql")]
        DbDriver::MySql => {
            let p = pool.mysql_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let result = query.execute(p).await?;
            Ok(result.last_insert_id() as i64)
        }
        #[cfg(feature = "postgres")]
        DbDriver::Postgres => {
            let p = pool.pg_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let row = query.fetch_one(p).await?;
            Ok(row.try_get::<i64, _>(0usize)?)
        }
        #[cfg(feature = "sqlite")]
        DbDriver::Sqlite => {
            let p = pool.sqlite_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let result = query.execute(p).await?;
            Ok(result.last_insert_rowid())
        }
        #[allow(unreachable_patterns)]
        _ => Err(DynApiError::NoPoolAvailable),
    }
}

/// 执行 UPDATE / DELETE，返回生效行数
pub async fn execute_write(pool: &DbPool, stmt: &SqlStatement) -> Result<u64> {
    let sql = pool.convert_sql(&stmt.sql);
    match pool.driver() {
        #[cfg(feature = "mysql")]
        DbDriver::MySql => {
            let p = pool.mysql_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let result = query.execute(p).await?;
            Ok(result.rows_affected())
        }
        #[cfg(feature = "postgres")]
        DbDriver::Postgres => {
            let p = pool.pg_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let result = query.execute(p).await?;
            Ok(result.rows_affected())
        }
        #[cfg(feature = "sqlite")]
        DbDriver::Sqlite => {
            let p = pool.sqlite_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let result = query.execute(p).await?;
            Ok(result.rows_affected())
        }
        #[allow(unreachable_patterns)]
        _ => Err(DynApiError::NoPoolAvailable),
    }
}

/// 执行 SELECT，按列顺序整理为 JSON 对象序列
pub async fn fetch_rows(pool: &DbPool, stmt: &SqlStatement) -> Result<Vec<Map<String, Value>>> {
    let sql = pool.convert_sql(&stmt.sql);
    match pool.driver() {
        #[cfg(feature = "mysql")]
        DbDriver::MySql => {
            let p = pool.mysql_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let rows = query.fetch_all(p).await?;
            Ok(rows.iter().map(mysql_row_to_json).collect())
        }
        #[cfg(feature = "postgres")]
        DbDriver::Postgres => {
            let p = pool.pg_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let rows = query.fetch_all(p).await?;
            Ok(rows.iter().map(pg_row_to_json).collect())
        }
        #[cfg(feature = "sqlite")]
        DbDriver::Sqlite => {
            let p = pool.sqlite_pool().ok_or(DynApiError::NoPoolAvailable)?;
            let query = apply_binds!(sqlx::query(&sql), &stmt.binds);
            let rows = query.fetch_all(p).await?;
            Ok(rows.iter().map(sqlite_row_to_json).collect())
        }
        #[allow(unreachable_patterns)]
        _ => Err(DynApiError::NoPoolAvailable),
    }
}

// ========== MySQL 行解码 ==========

#[cfg(feature = "mysql")]
fn mysql_row_to_json(row: &sqlx::mysql::MySqlRow) -> Map<String, Value> {
    let mut obj = Map::new();
    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name().to_ascii_uppercase();
        let value = match type_name.as_str() {
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "TINYINT UNSIGNED"
            | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED" | "BIGINT UNSIGNED" => {
                row.try_get::<Option<i64>, _>(name)
                    .ok()
                    .flatten()
                    .map(|v| Value::Number(v.into()))
            }
            "FLOAT" | "DOUBLE" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            "DECIMAL" | "NEWDECIMAL" => row
                .try_get::<Option<bigdecimal::BigDecimal>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "BOOLEAN" | "BOOL" => row
                .try_get::<Option<bool>, _>(name)
                .ok()
                .flatten()
                .map(Value::Bool),
            "JSON" => row
                .try_get::<Option<Value>, _>(name)
                .ok()
                .flatten(),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_rfc3339())),
            "DATETIME" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "TIME" => row
                .try_get::<Option<chrono::NaiveTime>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            _ => row
                .try_get::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map(Value::String),
        }
        .unwrap_or(Value::Null);

        obj.insert(name.to_string(), value);
    }
    obj
}

// ========== PostgreSQL 行解码 ==========

#[cfg(feature = "postgres")]
fn pg_row_to_json(row: &sqlx::postgres::PgRow) -> Map<String, Value> {
    let mut obj = Map::new();
    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name().to_ascii_uppercase();
        let value = match type_name.as_str() {
            "INT2" | "INT4" | "INT8" | "INTEGER" | "BIGINT" => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "FLOAT4" | "FLOAT8" | "DOUBLE PRECISION" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            "NUMERIC" => row
                .try_get::<Option<bigdecimal::BigDecimal>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "BOOL" | "BOOLEAN" => row
                .try_get::<Option<bool>, _>(name)
                .ok()
                .flatten()
                .map(Value::Bool),
            "JSON" | "JSONB" => row
                .try_get::<Option<Value>, _>(name)
                .ok()
                .flatten(),
            "UUID" => row
                .try_get::<Option<uuid::Uuid>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "TIMESTAMPTZ" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_rfc3339())),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::String(v.to_string())),
            _ => row
                .try_get::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map(Value::String),
        }
        .unwrap_or(Value::Null);

        obj.insert(name.to_string(), value);
    }
    obj
}

// ========== SQLite 行解码 ==========

#[cfg(feature = "sqlite")]
fn sqlite_row_to_json(row: &sqlx::sqlite::SqliteRow) -> Map<String, Value> {
    let mut obj = Map::new();
    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name().to_ascii_uppercase();
        let value = match type_name.as_str() {
            "INTEGER" | "INT" | "BIGINT" => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into())),
            "REAL" | "NUMERIC" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            "BOOLEAN" | "BOOL" => row
                .try_get::<Option<bool>, _>(name)
                .ok()
                .flatten()
                .map(Value::Bool),
            _ => row
                .try_get::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map(Value::String),
        }
        .unwrap_or(Value::Null);

        obj.insert(name.to_string(), value);
    }
    obj
}
