// ==========================================
// CNPJ 批量查询 - 结果表输出
// ==========================================
// 输出格式:
// - Xlsx: <输入文件名><后缀>.xlsx，工作表 "Resultados" + "CNAEs Secundários"
// - Csv:  <输入文件名><后缀>.csv + <输入文件名><后缀>_cnaes_secundarios.csv
// 规则: 登记字段列仅在至少一行查询成功时输出
// ==========================================

use crate::config::OutputFormat;
use crate::domain::{BatchOutput, CompanyFields, ResultRow, SecondaryClassificationRow};
use chrono::NaiveDate;
use csv::Writer;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// 结果表基础列（始终输出）
pub const RESULT_BASE_COLUMNS: &[&str] = &["CNPJ", "Data Processamento", "Resultado"];

/// 结果表登记字段列
pub const RESULT_REGISTRY_COLUMNS: &[&str] = &[
    "Razão Social",
    "Nome Fantasia",
    "Natureza Jurídica",
    "Porte",
    "Data de início das atividades",
    "Situação Cadastral",
    "Data Situação Cadastral",
    "Endereco Completo",
    "CNAE Principal - Código",
    "CNAE Principal - Nome",
];

/// 次要 CNAE 表列
pub const SECONDARY_COLUMNS: &[&str] = &[
    "CNPJ",
    "CNAE Secundário - Código",
    "CNAE Secundário - Nome",
];

/// 工作表名
pub const RESULTS_SHEET: &str = "Resultados";
pub const SECONDARY_SHEET: &str = "CNAEs Secundários";

const PROCESSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("结果文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel 写入失败: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("行数超出工作表上限: {0}")]
    TooManyRows(usize),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;

/// 输出文件路径
///
/// Xlsx 只有一个文件（两个工作表），secondary 为 None
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub format: OutputFormat,
    pub results: PathBuf,
    pub secondary: Option<PathBuf>,
}

impl ExportPaths {
    /// 根据输入文件推导输出路径（与输入文件同目录）
    pub fn for_input(input: &Path, suffix: &str, format: OutputFormat) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cnpj".to_string());
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        let ext = format.extension();

        let secondary = match format {
            OutputFormat::Xlsx => None,
            OutputFormat::Csv => Some(dir.join(format!("{}{}_cnaes_secundarios.{}", stem, suffix, ext))),
        };

        Self {
            format,
            results: dir.join(format!("{}{}.{}", stem, suffix, ext)),
            secondary,
        }
    }

    /// 所有输出文件
    pub fn files(&self) -> Vec<&Path> {
        std::iter::once(self.results.as_path())
            .chain(self.secondary.as_deref())
            .collect()
    }
}

// ==========================================
// TableWriter - 结果表写出
// ==========================================
pub struct TableWriter;

impl TableWriter {
    /// 结果表列（稀疏并集）
    pub fn result_columns(output: &BatchOutput) -> Vec<&'static str> {
        let mut columns = RESULT_BASE_COLUMNS.to_vec();
        if output.has_registry_fields() {
            columns.extend_from_slice(RESULT_REGISTRY_COLUMNS);
        }
        columns
    }

    /// 写出结果表（CSV）
    pub fn write_results<W: Write>(&self, output: &BatchOutput, sink: W) -> ExportResult<()> {
        let include_registry = output.has_registry_fields();
        let mut writer = Writer::from_writer(sink);

        writer.write_record(Self::result_columns(output))?;
        for row in &output.results {
            writer.write_record(result_record(row, include_registry))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 写出次要 CNAE 表（CSV）
    pub fn write_secondary<W: Write>(
        &self,
        rows: &[SecondaryClassificationRow],
        sink: W,
    ) -> ExportResult<()> {
        let mut writer = Writer::from_writer(sink);

        writer.write_record(SECONDARY_COLUMNS)?;
        for row in rows {
            writer.write_record(secondary_record(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 组装工作簿：结果表 + 次要 CNAE 表各一个工作表
    ///
    /// 所有单元格按文本写入（CNPJ 保留前导零）
    pub fn workbook(&self, output: &BatchOutput) -> ExportResult<Workbook> {
        let include_registry = output.has_registry_fields();
        let mut workbook = Workbook::new();

        write_sheet(
            &mut workbook,
            RESULTS_SHEET,
            &Self::result_columns(output),
            output.results.iter().map(|row| result_record(row, include_registry)),
        )?;
        write_sheet(
            &mut workbook,
            SECONDARY_SHEET,
            SECONDARY_COLUMNS,
            output.secondary.iter().map(secondary_record),
        )?;

        Ok(workbook)
    }

    /// 按路径中的格式写出结果文件
    pub fn write_files(&self, output: &BatchOutput, paths: &ExportPaths) -> ExportResult<()> {
        match (&paths.format, &paths.secondary) {
            (OutputFormat::Csv, Some(secondary)) => {
                self.write_results(output, File::create(&paths.results)?)?;
                self.write_secondary(&output.secondary, File::create(secondary)?)?;
            }
            _ => {
                self.workbook(output)?.save(&paths.results)?;
            }
        }

        info!(
            format = paths.format.extension(),
            results = %paths.results.display(),
            rows = output.results.len(),
            secondary_rows = output.secondary.len(),
            "结果文件已写出"
        );
        Ok(())
    }
}

fn write_sheet<I>(
    workbook: &mut Workbook,
    name: &str,
    header: &[&str],
    records: I,
) -> ExportResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    // 列数由列常量决定，不超过 u16
    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }

    for (idx, record) in records.into_iter().enumerate() {
        let row = u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows(idx + 1))?;
        for (col, value) in record.into_iter().enumerate() {
            // 空值留空白单元格
            if !value.is_empty() {
                sheet.write_string(row, col as u16, value)?;
            }
        }
    }

    sheet.autofit();
    Ok(())
}

fn result_record(row: &ResultRow, include_registry: bool) -> Vec<String> {
    let mut record = vec![
        row.cnpj.clone(),
        row.processed_at.format(PROCESSED_AT_FORMAT).to_string(),
        row.status.to_string(),
    ];

    if include_registry {
        match &row.fields {
            Some(fields) => record.extend(registry_cells(fields)),
            None => record.extend(std::iter::repeat(String::new()).take(RESULT_REGISTRY_COLUMNS.len())),
        }
    }
    record
}

fn secondary_record(row: &SecondaryClassificationRow) -> Vec<String> {
    vec![row.cnpj.clone(), row.code.clone(), row.name.clone()]
}

fn registry_cells(fields: &CompanyFields) -> Vec<String> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let date = |d: &Option<NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    vec![
        text(&fields.razao_social),
        text(&fields.nome_fantasia),
        text(&fields.natureza_juridica),
        text(&fields.porte),
        date(&fields.data_inicio_atividade),
        text(&fields.situacao_cadastral),
        date(&fields.data_situacao_cadastral),
        fields.endereco_completo.clone(),
        fields.cnae_principal_codigo.clone(),
        fields.cnae_principal_nome.clone(),
    ]
}
