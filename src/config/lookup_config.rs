// ==========================================
// CNPJ 批量查询 - 查询配置
// ==========================================
// 职责: 查询间隔 / 输入列名 / 输出文件后缀与格式
// 来源: 默认值 + 环境变量覆写
// ==========================================

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 配置键（环境变量名）
pub mod config_keys {
    /// 每次查询后的间隔（秒，可带小数）
    pub const DELAY_SECS: &str = "CNPJ_LOOKUP_DELAY_SECS";
    /// 最后一个 CNPJ 之后是否等待（1/true/yes/y/on）
    pub const TRAILING_DELAY: &str = "CNPJ_LOOKUP_TRAILING_DELAY";
    /// 输入表中的 CNPJ 列名
    pub const IDENTIFIER_COLUMN: &str = "CNPJ_LOOKUP_COLUMN";
    /// 结果文件名后缀
    pub const RESULTS_SUFFIX: &str = "CNPJ_LOOKUP_RESULTS_SUFFIX";
    /// 结果文件格式（xlsx / csv）
    pub const OUTPUT_FORMAT: &str = "CNPJ_LOOKUP_OUTPUT_FORMAT";
}

/// 默认查询间隔（秒）
pub const DEFAULT_DELAY_SECS: u64 = 5;

/// 默认 CNPJ 列名
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "CNPJ";

/// 默认结果文件后缀
pub const DEFAULT_RESULTS_SUFFIX: &str = "_resultado";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// OutputFormat - 结果文件格式
// ==========================================
// Xlsx: 单个工作簿，两个工作表
// Csv: 两个文件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// 文件扩展名（不含点）
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

// ==========================================
// LookupConfig - 查询配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    pub delay: Duration,
    pub trailing_delay: bool,
    pub identifier_column: String,
    pub results_suffix: String,
    pub output_format: OutputFormat,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            trailing_delay: true,
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            results_suffix: DEFAULT_RESULTS_SUFFIX.to_string(),
            output_format: OutputFormat::default(),
        }
    }
}

impl LookupConfig {
    /// 从环境变量加载（未设置的项使用默认值）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载
    ///
    /// 便于测试：不依赖进程环境变量
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = get(config_keys::DELAY_SECS) {
            config.delay = parse_delay(&raw)?;
        }

        if let Some(raw) = get(config_keys::TRAILING_DELAY) {
            config.trailing_delay = is_true(&raw);
        }

        if let Some(raw) = get(config_keys::IDENTIFIER_COLUMN) {
            let column = raw.trim();
            if !column.is_empty() {
                config.identifier_column = column.to_string();
            }
        }

        if let Some(raw) = get(config_keys::RESULTS_SUFFIX) {
            config.results_suffix = raw.trim().to_string();
        }

        if let Some(raw) = get(config_keys::OUTPUT_FORMAT) {
            config.output_format =
                OutputFormat::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    key: config_keys::OUTPUT_FORMAT.to_string(),
                    value: raw.clone(),
                    message: "仅支持 xlsx / csv".to_string(),
                })?;
        }

        Ok(config)
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn parse_delay(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        key: config_keys::DELAY_SECS.to_string(),
        value: raw.to_string(),
        message: message.to_string(),
    };

    let secs: f64 = raw.trim().parse().map_err(|_| invalid("不是数字"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid("必须为非负有限数"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<LookupConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LookupConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, LookupConfig::default());
        assert_eq!(config.delay, Duration::from_secs(5));
        assert!(config.trailing_delay);
        assert_eq!(config.identifier_column, "CNPJ");
        assert_eq!(config.output_format, OutputFormat::Xlsx);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (config_keys::DELAY_SECS, "0.5"),
            (config_keys::TRAILING_DELAY, "off"),
            (config_keys::IDENTIFIER_COLUMN, " Documento "),
            (config_keys::RESULTS_SUFFIX, "_out"),
            (config_keys::OUTPUT_FORMAT, "CSV"),
        ])
        .unwrap();

        assert_eq!(config.delay, Duration::from_millis(500));
        assert!(!config.trailing_delay);
        assert_eq!(config.identifier_column, "Documento");
        assert_eq!(config.results_suffix, "_out");
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_delay() {
        assert!(load(&[(config_keys::DELAY_SECS, "abc")]).is_err());
        assert!(load(&[(config_keys::DELAY_SECS, "-1")]).is_err());
    }

    #[test]
    fn test_invalid_output_format() {
        let err = load(&[(config_keys::OUTPUT_FORMAT, "ods")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == config_keys::OUTPUT_FORMAT));
    }
}
