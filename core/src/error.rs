use thiserror::Error;

#[derive(Debug, Error)]
pub enum DynApiError {
    /// 校验失败，消息原样返回给调用方（对应 HTTP 400）
    #[error("{0}")]
    Validation(String),
    #[error("Unsupported database URL: {0}")]
    UnsupportedDatabase(String),
    /// 存储层执行失败，原始错误只进日志，不回传给调用方
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No connection pool available for driver")]
    NoPoolAvailable,
}

impl DynApiError {
    /// 构造校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        DynApiError::Validation(message.into())
    }

    /// 是否为校验错误（客户端错误）
    pub fn is_validation(&self) -> bool {
        matches!(self, DynApiError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, DynApiError>;
