// ==========================================
// CNPJ 批量查询 - 配置层
// ==========================================
// 职责: 查询配置加载（默认值 + 环境变量覆写）
// ==========================================

pub mod lookup_config;

// 重导出核心配置
pub use lookup_config::{config_keys, ConfigError, LookupConfig, OutputFormat};
