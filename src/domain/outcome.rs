// ==========================================
// CNPJ 批量查询 - 查询结果（三态）
// ==========================================

use crate::domain::registry::RegistryRecord;
use crate::domain::types::QueryStatus;
use serde::{Deserialize, Serialize};

/// 单个 CNPJ 的查询结果
///
/// - Invalid: 校验未通过，未调用查询协作方
/// - Failed: 已调用协作方，返回业务错误（未找到 / 服务异常）
/// - Success: 原始登记记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LookupOutcome {
    Invalid,
    Failed { reason: String },
    Success(RegistryRecord),
}

impl LookupOutcome {
    pub fn status(&self) -> QueryStatus {
        match self {
            LookupOutcome::Invalid => QueryStatus::Invalid,
            LookupOutcome::Failed { .. } => QueryStatus::NotCompleted,
            LookupOutcome::Success(_) => QueryStatus::Completed,
        }
    }

    pub fn record(&self) -> Option<&RegistryRecord> {
        match self {
            LookupOutcome::Success(record) => Some(record),
            _ => None,
        }
    }
}
