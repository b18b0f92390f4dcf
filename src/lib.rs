// ==========================================
// CNPJ 批量查询 - 核心库
// ==========================================
// 职责: CNPJ 校验位校验 / 登记查询编排 / 结果汇总
// 系统定位: 查询核心（不含界面，不含网络客户端）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 查询结果与输出行
pub mod domain;

// 引擎层 - 校验 / 规范化 / 批量管道
pub mod engine;

// 查询协作方接口
pub mod lookup;

// 导入层 - 输入表
pub mod importer;

// 输出层 - 结果表
pub mod export;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// API 层
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    BatchOutput, BatchSummary, CompanyFields, LookupOutcome, QueryStatus, RegistryRecord,
    ResultRow, SecondaryClassification, SecondaryClassificationRow,
};

pub use engine::{
    estimate_batch, normalize, strip_punctuation, validate, BatchEstimate, BatchPipeline,
    BatchProgress, CancellationFlag, EngineError, ExtractionError, ProgressReporter,
};

pub use lookup::{consult, CnpjLookup, LookupError};

pub use api::{ApiError, QueryApi};

pub use config::{LookupConfig, OutputFormat};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
