use std::sync::Arc;

use dynapi::{actions, Action, ActionRequest, DbPool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Connecting to in-memory SQLite database...");
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let pool = DbPool::from_sqlite_pool(Arc::new(pool))?;
    println!("Connected successfully!\n");

    pool.execute("CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, age INTEGER)")
        .await?;

    // ========== 1. INSERT (插入) ==========
    println!("=== 1. INSERT (插入新记录) ===");
    let request = ActionRequest::from_body("users", br#"{"data": {"name": "Ann", "age": 30}}"#);
    let envelope = actions::dispatch(&pool, Action::Insert, &request).await?;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);
    let id = envelope.inserted_id.expect("insert returns an id");

    let request = ActionRequest::from_body("users", br#"{"data": {"name": "Bob", "age": 41}}"#);
    let envelope = actions::dispatch(&pool, Action::Insert, &request).await?;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);

    // ========== 2. GET (按主键查询) ==========
    println!("=== 2. GET (按主键查询) ===");
    let body = format!(r#"{{"primary_key_field": "id", "primary_key_value": {}}}"#, id);
    let request = ActionRequest::from_body("users", body.as_bytes());
    let envelope = actions::dispatch(&pool, Action::Get, &request).await?;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);

    // ========== 3. GET (过滤条件 + limit) ==========
    println!("=== 3. GET (过滤条件 + limit) ===");
    let request = ActionRequest::from_body("users", br#"{"filters": {"age": 41}, "limit": 5}"#);
    let envelope = actions::dispatch(&pool, Action::Get, &request).await?;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);

    // ========== 4. UPDATE (按主键更新) ==========
    println!("=== 4. UPDATE (按主键更新) ===");
    let body = format!(
        r#"{{"primary_key_field": "id", "primary_key_value": {}, "data": {{"age": 31}}}}"#,
        id
    );
    let request = ActionRequest::from_body("users", body.as_bytes());
    let envelope = actions::dispatch(&pool, Action::Update, &request).await?;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);

    // ========== 5. DELETE (按主键删除) ==========
    println!("=== 5. DELETE (按主键删除) ===");
    let body = format!(r#"{{"primary_key_field": "id", "primary_key_value": {}}}"#, id);
    let request = ActionRequest::from_body("users", body.as_bytes());
    let envelope = actions::dispatch(&pool, Action::Delete, &request).await?;
    println!("{}\n", serde_json::to_string_pretty(&envelope)?);

    // 再删一次：零行生效，error 状态但不是失败
    let request = ActionRequest::from_body("users", body.as_bytes());
    let envelope = actions::dispatch(&pool, Action::Delete, &request).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
