// ==========================================
// CNPJ 批量查询 - 输出层
// ==========================================
// 职责: 将批次结果写出为结果表与次要 CNAE 表
// ==========================================

pub mod table_writer;

pub use table_writer::{ExportError, ExportPaths, ExportResult, TableWriter};
