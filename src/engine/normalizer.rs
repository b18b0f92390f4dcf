// ==========================================
// CNPJ 批量查询 - 查询结果规范化
// ==========================================
// 职责: LookupOutcome → (状态, 扁平字段, 次要 CNAE 列表)
// 规则:
// - 标量字段缺失 → None
// - 日期解析失败 → None（不报错）
// - 地址 / 主要 CNAE 嵌套键缺失 → ExtractionError（不兜底）
// ==========================================

use crate::domain::registry::{keys, value_to_text, RegistryRecord, SecondaryClassification};
use crate::domain::{CompanyFields, LookupOutcome, QueryStatus};
use crate::engine::error::ExtractionError;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// 规范化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub status: QueryStatus,
    /// 仅 Success 时存在
    pub fields: Option<CompanyFields>,
    pub secondary: Vec<SecondaryClassification>,
}

/// 规范化单个查询结果
///
/// 纯函数：相同输入总是得到相同输出。
pub fn normalize(outcome: &LookupOutcome) -> Result<Normalized, ExtractionError> {
    let fields = match outcome.record() {
        Some(record) => Some(extract_fields(record)?),
        None => None,
    };

    Ok(Normalized {
        status: outcome.status(),
        fields,
        secondary: extract_secondary_classifications(outcome)?,
    })
}

/// 从成功记录提取扁平字段
pub fn extract_fields(record: &RegistryRecord) -> Result<CompanyFields, ExtractionError> {
    let cnae = require_object(record.as_map(), keys::CNAE_PRINCIPAL, keys::CNAE_PRINCIPAL)?;

    Ok(CompanyFields {
        razao_social: record.text(keys::RAZAO_SOCIAL),
        nome_fantasia: record.text(keys::NOME_FANTASIA),
        natureza_juridica: record.text(keys::NATUREZA_JURIDICA),
        porte: record.text(keys::PORTE),
        data_inicio_atividade: parse_iso_date(record.get(keys::DATA_INICIO_ATIVIDADE)),
        situacao_cadastral: record.text(keys::SITUACAO_CADASTRAL),
        data_situacao_cadastral: parse_iso_date(record.get(keys::DATA_SITUACAO_CADASTRAL)),
        endereco_completo: format_address(record)?,
        cnae_principal_codigo: require_text(cnae, keys::CODIGO, keys::CNAE_PRINCIPAL)?,
        cnae_principal_nome: require_text(cnae, keys::NOME, keys::CNAE_PRINCIPAL)?,
    })
}

/// 拼接完整地址
///
/// 格式: `{tipo_logradouro} {logradouro}, {numero}, {bairro}, {municipio}-{uf}, CEP {cep}`
pub fn format_address(record: &RegistryRecord) -> Result<String, ExtractionError> {
    let endereco = require_object(record.as_map(), keys::ENDERECO, keys::ENDERECO)?;
    let part = |key: &str| require_text(endereco, key, keys::ENDERECO);

    Ok(format!(
        "{} {}, {}, {}, {}-{}, CEP {}",
        part(keys::TIPO_LOGRADOURO)?,
        part(keys::LOGRADOURO)?,
        part(keys::NUMERO)?,
        part(keys::BAIRRO)?,
        part(keys::MUNICIPIO)?,
        part(keys::UF)?,
        part(keys::CEP)?,
    ))
}

/// 提取次要 CNAE 列表
///
/// - 非 Success 或记录中无 `cnae_fiscal_secundaria` 键 → 空列表
/// - 否则按原顺序返回；值不是数组（含 null）或条目缺少 codigo / nome → ExtractionError
pub fn extract_secondary_classifications(
    outcome: &LookupOutcome,
) -> Result<Vec<SecondaryClassification>, ExtractionError> {
    let record = match outcome.record() {
        Some(record) => record,
        None => return Ok(Vec::new()),
    };

    let entries = match record.get(keys::CNAE_SECUNDARIA) {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(ExtractionError::UnexpectedType {
                path: keys::CNAE_SECUNDARIA.to_string(),
                expected: "array",
            })
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| -> Result<SecondaryClassification, ExtractionError> {
            let path = format!("{}[{}]", keys::CNAE_SECUNDARIA, idx);
            let entry = entry.as_object().ok_or_else(|| ExtractionError::UnexpectedType {
                path: path.clone(),
                expected: "object",
            })?;
            Ok(SecondaryClassification {
                code: require_text(entry, keys::CODIGO, &path)?,
                name: require_text(entry, keys::NOME, &path)?,
            })
        })
        .collect()
}

/// 解析 ISO 日期（YYYY-MM-DD）
///
/// 缺失、null、非字符串或格式错误 → None
pub fn parse_iso_date(value: Option<&Value>) -> Option<NaiveDate> {
    let text = value?.as_str()?;
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

// ==========================================
// 严格取值辅助函数
// ==========================================

fn require_object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ExtractionError> {
    match map.get(key) {
        None => Err(ExtractionError::missing(path)),
        Some(Value::Object(inner)) => Ok(inner),
        Some(_) => Err(ExtractionError::UnexpectedType {
            path: path.to_string(),
            expected: "object",
        }),
    }
}

/// 键必须存在；值为 null 时渲染为空字符串
fn require_text(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<String, ExtractionError> {
    map.get(key)
        .map(|v| value_to_text(v).unwrap_or_default())
        .ok_or_else(|| ExtractionError::missing(format!("{}.{}", parent, key)))
}
