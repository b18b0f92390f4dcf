// ==========================================
// CNPJ 批量查询 - 登记记录
// ==========================================
// 职责: 查询协作方返回的原始登记记录（JSON 对象）
// 红线: 只做包装与取值，不做字段提取规则
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// 原始记录中的键名
pub mod keys {
    pub const RAZAO_SOCIAL: &str = "razao_social";
    pub const NOME_FANTASIA: &str = "nome_fantasia";
    pub const NATUREZA_JURIDICA: &str = "natureza_juridica";
    pub const PORTE: &str = "porte";
    pub const DATA_INICIO_ATIVIDADE: &str = "data_inicio_atividade";
    pub const SITUACAO_CADASTRAL: &str = "situacao_cadastral";
    pub const DATA_SITUACAO_CADASTRAL: &str = "data_situacao_cadastral";

    pub const ENDERECO: &str = "endereco";
    pub const TIPO_LOGRADOURO: &str = "tipo_logradouro";
    pub const LOGRADOURO: &str = "logradouro";
    pub const NUMERO: &str = "numero";
    pub const BAIRRO: &str = "bairro";
    pub const MUNICIPIO: &str = "municipio";
    pub const UF: &str = "uf";
    pub const CEP: &str = "cep";

    pub const CNAE_PRINCIPAL: &str = "cnae_fiscal_principal";
    pub const CNAE_SECUNDARIA: &str = "cnae_fiscal_secundaria";
    pub const CODIGO: &str = "codigo";
    pub const NOME: &str = "nome";
}

// ==========================================
// RegistryRecord - 登记记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryRecord(Map<String, Value>);

impl RegistryRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// 从 JSON 值构造（仅接受对象）
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// 读取标量字段文本（缺失或 null → None）
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_to_text)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

/// JSON 标量转文本
///
/// - null → None
/// - 字符串 → 原文
/// - 其他 → JSON 文本（如数字代码 6201501）
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ==========================================
// SecondaryClassification - 次要 CNAE 条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryClassification {
    pub code: String,
    pub name: String,
}
