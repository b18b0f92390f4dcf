// ==========================================
// CNPJ 批量查询 - CNPJ 列提取
// ==========================================
// 职责: 从输入表中按列名提取 CNPJ 列表（保持输入顺序）
// 规则: 缺少 CNPJ 列 → ImportError::MissingColumn（批次前置错误）
// ==========================================

use crate::engine::checksum::CNPJ_LENGTH;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{FileParser, RawTable, UniversalFileParser};
use std::path::Path;
use tracing::{debug, info};

/// 电子表格丢失前导零后可恢复的最短位数
const MIN_PADDABLE_DIGITS: usize = 11;

pub struct IdentifierSource {
    column: String,
    parser: Box<dyn FileParser>,
}

impl IdentifierSource {
    /// 创建提取器（按扩展名自动选择解析器）
    pub fn new(column: impl Into<String>) -> Self {
        Self::with_parser(column, Box::new(UniversalFileParser))
    }

    pub fn with_parser(column: impl Into<String>, parser: Box<dyn FileParser>) -> Self {
        Self {
            column: column.into(),
            parser,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// 读取文件并提取 CNPJ 列
    pub fn read<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<String>> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), column = %self.column, "读取输入表");

        let table = self.parser.parse(path)?;
        let identifiers = self.extract(&table)?;

        info!(total = identifiers.len(), "输入表读取完成");
        Ok(identifiers)
    }

    /// 从已解析的表中提取 CNPJ 列
    pub fn extract(&self, table: &RawTable) -> ImportResult<Vec<String>> {
        if !table.has_column(&self.column) {
            return Err(ImportError::MissingColumn {
                column: self.column.clone(),
                available: table.headers.join(", "),
            });
        }

        let identifiers = table
            .rows
            .iter()
            .map(|row| {
                let value = row.get(&self.column).map(String::as_str).unwrap_or("");
                restore_leading_zeros(value)
            })
            .collect::<Vec<_>>();

        debug!(total = identifiers.len(), "CNPJ 列提取完成");
        Ok(identifiers)
    }
}

/// 恢复纯数字 CNPJ 丢失的前导零
///
/// 仅处理 11-13 位的纯数字文本，其他输入原样返回（含格式符号的文本不处理）
pub fn restore_leading_zeros(value: &str) -> String {
    let trimmed = value.trim();
    let len = trimmed.len();
    if (MIN_PADDABLE_DIGITS..CNPJ_LENGTH).contains(&len)
        && trimmed.bytes().all(|b| b.is_ascii_digit())
    {
        format!("{:0>width$}", trimmed, width = CNPJ_LENGTH)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(headers: &[&str], rows: &[&[(&str, &str)]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<HashMap<_, _>>()
                })
                .collect(),
        }
    }

    #[test]
    fn test_extract_in_order() {
        let t = table(
            &["CNPJ", "Nome"],
            &[
                &[("CNPJ", "11.222.333/0001-81"), ("Nome", "A")],
                &[("CNPJ", "45398765000160"), ("Nome", "B")],
                &[("CNPJ", "11.222.333/0001-81"), ("Nome", "A")],
            ],
        );

        let ids = IdentifierSource::new("CNPJ").extract(&t).unwrap();
        // 不去重
        assert_eq!(
            ids,
            vec!["11.222.333/0001-81", "45398765000160", "11.222.333/0001-81"]
        );
    }

    #[test]
    fn test_missing_column() {
        let t = table(&["Documento"], &[&[("Documento", "11222333000181")]]);
        let err = IdentifierSource::new("CNPJ").extract(&t).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { ref column, .. } if column == "CNPJ"));
    }

    #[test]
    fn test_column_name_is_exact() {
        let t = table(&["cnpj"], &[&[("cnpj", "11222333000181")]]);
        assert!(IdentifierSource::new("CNPJ").extract(&t).is_err());
    }

    #[test]
    fn test_missing_cell_is_empty() {
        let t = table(&["CNPJ", "Nome"], &[&[("Nome", "sem cnpj")]]);
        let ids = IdentifierSource::new("CNPJ").extract(&t).unwrap();
        assert_eq!(ids, vec![""]);
    }

    #[test]
    fn test_restore_leading_zeros() {
        assert_eq!(restore_leading_zeros("1234567000195"), "01234567000195");
        assert_eq!(restore_leading_zeros("191000010001"), "00191000010001");
        assert_eq!(restore_leading_zeros("11222333000181"), "11222333000181");
        assert_eq!(restore_leading_zeros("123"), "123");
        assert_eq!(restore_leading_zeros("11.222.333/0001-81"), "11.222.333/0001-81");
    }
}
