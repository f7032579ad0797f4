//! 服务端共享状态

use dynapi::DbPool;

/// 所有处理器共享的状态
pub struct AppState {
    /// 数据库连接池，由进程启动时创建，处理器只借用
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}
