// ==========================================
// CNPJ 批量查询 - 导入层
// ==========================================
// 职责: 读取输入表，提取 CNPJ 列
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod identifier_source;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawTable, UniversalFileParser};
pub use identifier_source::{restore_leading_zeros, IdentifierSource};
