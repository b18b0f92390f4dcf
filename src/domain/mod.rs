// ==========================================
// CNPJ 批量查询 - 领域模型层
// ==========================================
// 职责: 定义查询结果、登记记录、输出行
// 红线: 不含查询逻辑,不含文件读写
// ==========================================

pub mod outcome;
pub mod registry;
pub mod result;
pub mod types;

// 重导出核心类型
pub use outcome::LookupOutcome;
pub use registry::{RegistryRecord, SecondaryClassification};
pub use result::{
    BatchOutput, BatchSummary, CompanyFields, ResultRow, SecondaryClassificationRow,
};
pub use types::QueryStatus;
