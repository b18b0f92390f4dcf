// ==========================================
// CNPJ 批量查询 - 结果行
// ==========================================
// 职责: 批量查询输出的两张表的行结构
// - Results: 每个 CNPJ 一行
// - SecondaryClassifications: 每个 (CNPJ, 次要 CNAE) 一行
// ==========================================

use crate::domain::registry::SecondaryClassification;
use crate::domain::types::QueryStatus;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// CompanyFields - 从登记记录提取的扁平字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFields {
    pub razao_social: Option<String>,
    pub nome_fantasia: Option<String>,
    pub natureza_juridica: Option<String>,
    pub porte: Option<String>,
    pub data_inicio_atividade: Option<NaiveDate>,
    pub situacao_cadastral: Option<String>,
    pub data_situacao_cadastral: Option<NaiveDate>,
    pub endereco_completo: String,
    pub cnae_principal_codigo: String,
    pub cnae_principal_nome: String,
}

// ==========================================
// ResultRow - 结果表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// 输入中的原始 CNPJ 文本
    pub cnpj: String,
    pub processed_at: DateTime<Local>,
    pub status: QueryStatus,
    /// 仅 Completed 时存在
    pub fields: Option<CompanyFields>,
}

// ==========================================
// SecondaryClassificationRow - 次要 CNAE 表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryClassificationRow {
    pub cnpj: String,
    pub code: String,
    pub name: String,
}

impl SecondaryClassificationRow {
    pub fn from_entry(cnpj: &str, entry: SecondaryClassification) -> Self {
        Self {
            cnpj: cnpj.to_string(),
            code: entry.code,
            name: entry.name,
        }
    }
}

// ==========================================
// BatchSummary - 批次汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub not_completed: usize,
    pub invalid: usize,
    pub secondary_classifications: usize,
}

// ==========================================
// BatchOutput - 一次批量查询的全部输出
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    pub results: Vec<ResultRow>,
    pub secondary: Vec<SecondaryClassificationRow>,
}

impl BatchOutput {
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.results.len(),
            secondary_classifications: self.secondary.len(),
            ..Default::default()
        };
        for row in &self.results {
            match row.status {
                QueryStatus::Completed => summary.completed += 1,
                QueryStatus::NotCompleted => summary.not_completed += 1,
                QueryStatus::Invalid => summary.invalid += 1,
            }
        }
        summary
    }

    /// 是否有任一行带登记字段（决定结果表是否输出登记字段列）
    pub fn has_registry_fields(&self) -> bool {
        self.results.iter().any(|r| r.fields.is_some())
    }
}
