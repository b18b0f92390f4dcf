// ==========================================
// CNPJ 批量查询 - API 层错误类型
// ==========================================
// 职责: 汇总各层错误，转换为调用方可展示的错误
// ==========================================

use crate::config::ConfigError;
use crate::engine::{EngineError, ExtractionError};
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("输入表读取失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 处理错误
    // ==========================================
    #[error("登记记录提取失败: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("批量查询失败: {0}")]
    Engine(#[from] EngineError),

    // ==========================================
    // 输出错误
    // ==========================================
    #[error("结果输出失败: {0}")]
    Export(#[from] ExportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
