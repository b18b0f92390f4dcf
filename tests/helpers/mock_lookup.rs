// ==========================================
// Mock 查询协作方 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use cnpj_batch_lookup::domain::RegistryRecord;
use cnpj_batch_lookup::lookup::{CnpjLookup, LookupError, LookupResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// 预置的查询响应
#[derive(Debug, Clone)]
pub enum MockResponse {
    Found(RegistryRecord),
    NotFound,
    Unavailable,
}

/// Mock 查询协作方
///
/// 未预置的 CNPJ 返回 NotFound；记录每次调用的 CNPJ
#[derive(Debug, Default)]
pub struct MockLookup {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, cnpj: &str, record: RegistryRecord) -> Self {
        self.responses
            .insert(cnpj.to_string(), MockResponse::Found(record));
        self
    }

    pub fn with_unavailable(mut self, cnpj: &str) -> Self {
        self.responses
            .insert(cnpj.to_string(), MockResponse::Unavailable);
        self
    }

    /// 已调用的 CNPJ（按调用顺序）
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CnpjLookup for MockLookup {
    async fn lookup(&self, cnpj: &str) -> LookupResult<RegistryRecord> {
        self.calls.lock().unwrap().push(cnpj.to_string());

        match self.responses.get(cnpj) {
            Some(MockResponse::Found(record)) => Ok(record.clone()),
            Some(MockResponse::Unavailable) => {
                Err(LookupError::ServiceUnavailable("503 Service Unavailable".to_string()))
            }
            Some(MockResponse::NotFound) | None => Err(LookupError::NotFound(cnpj.to_string())),
        }
    }
}
