// ==========================================
// CNPJ 批量查询 - 查询协作方接口
// ==========================================
// 职责: 定义登记查询接口（不包含网络实现）
// 流程: 清洗 → 校验 → 查询 → LookupOutcome
// ==========================================

pub mod error;

pub use error::{LookupError, LookupResult};

use crate::domain::{LookupOutcome, RegistryRecord};
use crate::engine::checksum;
use async_trait::async_trait;
use tracing::{debug, warn};

// ==========================================
// CnpjLookup Trait
// ==========================================
// 用途: 登记查询主接口
// 实现者: 外部 HTTP 客户端 / 测试桩
#[async_trait]
pub trait CnpjLookup: Send + Sync {
    /// 查询登记记录
    ///
    /// # 参数
    /// - cnpj: 已清洗、已通过校验的 14 位 CNPJ
    ///
    /// # 返回
    /// - Ok(RegistryRecord): 原始登记记录
    /// - Err(LookupError): 未找到 / 服务不可用等业务错误
    async fn lookup(&self, cnpj: &str) -> LookupResult<RegistryRecord>;
}

/// 查询单个 CNPJ（原始输入）
///
/// - 去除 `.` `-` `/` 后校验，未通过 → Invalid，不调用协作方
/// - 协作方返回错误 → Failed（错误在此处吸收，不向上传播）
/// - 否则 → Success
pub async fn consult<L>(lookup: &L, raw: &str) -> LookupOutcome
where
    L: CnpjLookup + ?Sized,
{
    let cnpj = checksum::strip_punctuation(raw.trim());

    if !checksum::validate(&cnpj) {
        debug!(cnpj = %raw, "CNPJ 校验未通过");
        return LookupOutcome::Invalid;
    }

    match lookup.lookup(&cnpj).await {
        Ok(record) => LookupOutcome::Success(record),
        Err(e) => {
            warn!(cnpj = %cnpj, error = %e, "CNPJ 查询未完成");
            LookupOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLookup {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CnpjLookup for CountingLookup {
        async fn lookup(&self, cnpj: &str) -> LookupResult<RegistryRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(LookupError::NotFound(cnpj.to_string()))
            } else {
                Ok(RegistryRecord::default())
            }
        }
    }

    #[tokio::test]
    async fn test_consult_strips_and_succeeds() {
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let outcome = consult(&lookup, "11.222.333/0001-81").await;
        assert_eq!(outcome.status(), QueryStatus::Completed);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_consult_invalid_skips_lookup() {
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let outcome = consult(&lookup, "00000000000000").await;
        assert_eq!(outcome, LookupOutcome::Invalid);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_consult_failure_is_absorbed() {
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let outcome = consult(&lookup, "11222333000181").await;
        assert_eq!(outcome.status(), QueryStatus::NotCompleted);
    }
}
