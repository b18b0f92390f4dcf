// ==========================================
// CNPJ 批量查询 - 查询协作方错误类型
// ==========================================

use thiserror::Error;

/// 登记查询业务错误
///
/// 批量管道在调用处吸收此错误，结果状态记为 "Query Not Completed"
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("CNPJ 未找到: {0}")]
    NotFound(String),

    #[error("查询服务不可用: {0}")]
    ServiceUnavailable(String),

    #[error("查询被限流: {0}")]
    RateLimited(String),

    #[error("查询响应格式错误: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type LookupResult<T> = Result<T, LookupError>;
