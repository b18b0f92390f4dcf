// ==========================================
// CNPJ 批量查询 - API 层
// ==========================================
// 职责: 对展示层（控制台 / GUI）暴露查询入口
// ==========================================

pub mod error;
pub mod query_api;

pub use error::{ApiError, ApiResult};
pub use query_api::{BatchFileResponse, BatchQueryResponse, QueryApi, SingleQueryResponse};
