//! 动作处理
//!
//! 四个动作共用同一套流程：校验必填字段（Builder 内完成）→ 构建语句 →
//! 绑定执行 → 整理响应。零行生效的 UPDATE / DELETE 返回 error 状态的
//! 响应体，但不作为错误向上传播（HTTP 层保持 200）。

use crate::builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
use crate::db_pool::DbPool;
use crate::error::Result;
use crate::executor;
use crate::request::{Action, ActionRequest};
use crate::response::ResponseEnvelope;

/// 按动作分发
pub async fn dispatch(pool: &DbPool, action: Action, request: &ActionRequest) -> Result<ResponseEnvelope> {
    match action {
        Action::Insert => insert(pool, request).await,
        Action::Update => update(pool, request).await,
        Action::Delete => delete(pool, request).await,
        Action::Get => get(pool, request).await,
    }
}

/// 插入一条记录，返回插入 ID
pub async fn insert(pool: &DbPool, request: &ActionRequest) -> Result<ResponseEnvelope> {
    let stmt = InsertBuilder::new(request).build(pool.driver())?;
    let inserted_id = executor::execute_insert(pool, &stmt).await?;
    Ok(ResponseEnvelope::inserted(inserted_id))
}

/// 按主键更新一条记录
pub async fn update(pool: &DbPool, request: &ActionRequest) -> Result<ResponseEnvelope> {
    let stmt = UpdateBuilder::new(request).build(pool.driver())?;
    let affected = executor::execute_write(pool, &stmt).await?;
    if affected > 0 {
        Ok(ResponseEnvelope::success_message("Data updated successfully."))
    } else {
        Ok(ResponseEnvelope::soft_error("No record updated."))
    }
}

/// 按主键删除一条记录
pub async fn delete(pool: &DbPool, request: &ActionRequest) -> Result<ResponseEnvelope> {
    let stmt = DeleteBuilder::new(request).build(pool.driver())?;
    let affected = executor::execute_write(pool, &stmt).await?;
    if affected > 0 {
        Ok(ResponseEnvelope::success_message("Record deleted successfully."))
    } else {
        Ok(ResponseEnvelope::soft_error("No record found to delete."))
    }
}

/// 按条件查询，count 恒等于返回行数
pub async fn get(pool: &DbPool, request: &ActionRequest) -> Result<ResponseEnvelope> {
    let stmt = SelectBuilder::new(request).build(pool.driver())?;
    let rows = executor::fetch_rows(pool, &stmt).await?;
    Ok(ResponseEnvelope::rows(rows))
}
