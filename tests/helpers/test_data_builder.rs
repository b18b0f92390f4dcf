// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use cnpj_batch_lookup::domain::RegistryRecord;
use cnpj_batch_lookup::engine::checksum::check_digits_for;
use serde_json::{json, Map, Value};

/// 为 12 位基数补全校验位，得到有效 CNPJ
pub fn valid_cnpj(base: &str) -> String {
    format!("{}{}", base, check_digits_for(base).unwrap())
}

// ==========================================
// RegistryRecord 构建器
// ==========================================

pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    /// 创建包含完整地址与主要 CNAE 的记录
    pub fn new(razao_social: &str) -> Self {
        let value = json!({
            "razao_social": razao_social,
            "nome_fantasia": null,
            "natureza_juridica": "Sociedade Empresária Limitada",
            "porte": "DEMAIS",
            "data_inicio_atividade": "2005-03-21",
            "situacao_cadastral": "ATIVA",
            "data_situacao_cadastral": "2005-03-21",
            "endereco": {
                "tipo_logradouro": "AVENIDA",
                "logradouro": "BRIGADEIRO FARIA LIMA",
                "numero": "3477",
                "bairro": "ITAIM BIBI",
                "municipio": "SAO PAULO",
                "uf": "SP",
                "cep": "04538133"
            },
            "cnae_fiscal_principal": {
                "codigo": 6201501,
                "nome": "Desenvolvimento de programas de computador sob encomenda"
            }
        });
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { fields }
    }

    pub fn trade_name(mut self, name: &str) -> Self {
        self.fields.insert("nome_fantasia".to_string(), json!(name));
        self
    }

    pub fn start_date(mut self, date: &str) -> Self {
        self.fields
            .insert("data_inicio_atividade".to_string(), json!(date));
        self
    }

    pub fn secondary(mut self, entries: &[(u32, &str)]) -> Self {
        let list: Vec<Value> = entries
            .iter()
            .map(|(code, name)| json!({ "codigo": code, "nome": name }))
            .collect();
        self.fields
            .insert("cnae_fiscal_secundaria".to_string(), Value::Array(list));
        self
    }

    pub fn without_address_field(mut self, key: &str) -> Self {
        if let Some(Value::Object(address)) = self.fields.get_mut("endereco") {
            address.remove(key);
        }
        self
    }

    pub fn build(self) -> RegistryRecord {
        RegistryRecord::new(self.fields)
    }
}
