// ==========================================
// CNPJ 批量查询 - 引擎层
// ==========================================
// 职责: 校验位算法 / 结果规范化 / 批量管道 / 耗时预估
// 红线: 不含文件读写，不含网络实现
// ==========================================

pub mod batch;
pub mod checksum;
pub mod error;
pub mod estimate;
pub mod normalizer;
pub mod progress;

// 重导出核心类型
pub use batch::{BatchPipeline, CancellationFlag};
pub use checksum::{strip_punctuation, validate};
pub use error::{EngineError, EngineResult, ExtractionError};
pub use estimate::{estimate_batch, BatchEstimate, DurationBreakdown};
pub use normalizer::{normalize, Normalized};
pub use progress::{
    BatchProgress, NoOpProgressReporter, ProgressReporter, TracingProgressReporter,
};
