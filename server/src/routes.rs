//! 路由与动态表处理
//!
//! 单一动态端点：表名与动作来自 URL 路径，body 为 JSON（缺失或畸形时
//! 按空对象处理）。动作在进入核心层之前完成识别与校验。

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use dynapi::{actions, Action, ActionRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// 构建路由
///
/// 动态端点同时注册带斜杠与不带斜杠两种形式，方法不限。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/dynamic_api/:table/:action", any(dynamic_handler))
        .route("/api/dynamic_api/:table/:action/", any(dynamic_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 动态表处理器
async fn dynamic_handler(
    State(state): State<Arc<AppState>>,
    Path((table, action)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    if table.trim().is_empty() || action.trim().is_empty() {
        return ApiError::validation("Table name and type are required in the URL.")
            .into_response();
    }

    let Some(action) = Action::parse(&action) else {
        return ApiError::validation("Invalid action type. Use insert/update/delete/get.")
            .into_response();
    };

    let request = ActionRequest::from_body(table, &body);
    match actions::dispatch(&state.pool, action, &request).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// 健康检查
async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
