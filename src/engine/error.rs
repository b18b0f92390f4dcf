// ==========================================
// CNPJ 批量查询 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 登记记录提取错误
///
/// 成功记录缺少必需的嵌套结构（地址、主要 CNAE 等）时产生。
/// 与查询失败（LookupError）区分：这是上游数据契约违反，不做默认值兜底。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("登记记录缺少字段: {path}")]
    MissingField { path: String },

    #[error("登记记录字段类型错误: {path}（期望 {expected}）")]
    UnexpectedType { path: String, expected: &'static str },
}

impl ExtractionError {
    pub fn missing(path: impl Into<String>) -> Self {
        ExtractionError::MissingField { path: path.into() }
    }
}

/// 批量管道错误
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("CNPJ {cnpj} 的登记记录提取失败: {source}")]
    Extraction {
        cnpj: String,
        #[source]
        source: ExtractionError,
    },

    #[error("批量查询已取消（已处理 {processed}/{total}）")]
    Cancelled { processed: usize, total: usize },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
