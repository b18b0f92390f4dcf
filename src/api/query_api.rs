// ==========================================
// CNPJ 批量查询 - 查询 API
// ==========================================
// 职责: 封装单个查询与批量查询的完整流程
// 批量流程: 读取输入表 → 预估 → 批量管道 → 写出结果表与次要 CNAE 表
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::LookupConfig;
use crate::domain::{
    BatchOutput, BatchSummary, CompanyFields, LookupOutcome, QueryStatus,
    SecondaryClassification,
};
use crate::engine::checksum::strip_punctuation;
use crate::engine::estimate::{BatchEstimate, DurationBreakdown};
use crate::engine::normalizer::normalize;
use crate::engine::progress::ProgressReporter;
use crate::engine::BatchPipeline;
use crate::export::{ExportPaths, TableWriter};
use crate::importer::IdentifierSource;
use crate::lookup::{consult, CnpjLookup};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

/// 单个查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleQueryResponse {
    /// 去除格式符号后的 CNPJ
    pub cnpj: String,
    pub status: QueryStatus,
    pub outcome: LookupOutcome,
    pub fields: Option<CompanyFields>,
    pub secondary: Vec<SecondaryClassification>,
}

impl SingleQueryResponse {
    /// 展示文本：成功时为登记记录 JSON，否则为错误说明
    pub fn display_text(&self) -> String {
        match &self.outcome {
            LookupOutcome::Success(record) => record.to_pretty_json(),
            LookupOutcome::Invalid => "Invalid CNPJ".to_string(),
            LookupOutcome::Failed { reason } => format!("Query error: {}", reason),
        }
    }
}

/// 批量查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchQueryResponse {
    pub estimate: BatchEstimate,
    pub summary: BatchSummary,
    pub output: BatchOutput,
    /// 实际耗时
    pub elapsed: DurationBreakdown,
}

/// 批量文件查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFileResponse {
    pub batch: BatchQueryResponse,
    /// 结果文件（Xlsx 时包含两个工作表）
    pub results_path: String,
    /// 次要 CNAE 文件（仅 Csv）
    pub secondary_path: Option<String>,
}

// ==========================================
// QueryApi - 查询 API
// ==========================================
pub struct QueryApi<L>
where
    L: CnpjLookup,
{
    config: LookupConfig,
    pipeline: BatchPipeline<L>,
}

impl<L> QueryApi<L>
where
    L: CnpjLookup,
{
    /// 创建新的 QueryApi 实例
    pub fn new(lookup: L, config: LookupConfig) -> Self {
        let pipeline = BatchPipeline::from_config(lookup, &config);
        Self { config, pipeline }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &BatchPipeline<L> {
        &self.pipeline
    }

    /// 单个 CNPJ 查询（不经过批量管道，无间隔）
    ///
    /// # 返回
    /// - Ok(SingleQueryResponse): 三种状态之一
    /// - Err(ApiError::InvalidInput): 输入为空
    /// - Err(ApiError::Extraction): 成功记录缺少必需结构
    pub async fn query_single(&self, raw: &str) -> ApiResult<SingleQueryResponse> {
        if raw.trim().is_empty() {
            return Err(ApiError::InvalidInput("请输入 CNPJ".to_string()));
        }

        let outcome = consult(self.pipeline.lookup(), raw).await;
        let normalized = normalize(&outcome)?;

        Ok(SingleQueryResponse {
            cnpj: strip_punctuation(raw.trim()),
            status: normalized.status,
            outcome,
            fields: normalized.fields,
            secondary: normalized.secondary,
        })
    }

    /// 批量查询（CNPJ 列表）
    pub async fn query_batch<S>(
        &self,
        identifiers: &[S],
        reporter: &dyn ProgressReporter,
    ) -> ApiResult<BatchQueryResponse>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let estimate = self.pipeline.estimate(identifiers.len(), Local::now());

        let output = self
            .pipeline
            .run_with_estimate(identifiers, &estimate, reporter)
            .await?;

        Ok(BatchQueryResponse {
            estimate,
            summary: output.summary(),
            output,
            elapsed: DurationBreakdown::from_duration(start.elapsed()),
        })
    }

    /// 批量查询（输入表文件）
    ///
    /// 缺少 CNPJ 列时在任何查询开始前返回错误；
    /// 结果写出到输入文件同目录
    #[instrument(skip(self, file_path, reporter))]
    pub async fn query_batch_file<P>(
        &self,
        file_path: P,
        reporter: &dyn ProgressReporter,
    ) -> ApiResult<BatchFileResponse>
    where
        P: AsRef<Path>,
    {
        let path = file_path.as_ref();

        // === 步骤 1: 读取输入表 ===
        let identifiers =
            IdentifierSource::new(self.config.identifier_column.as_str()).read(path)?;

        // === 步骤 2: 批量查询 ===
        let batch = self.query_batch(identifiers.as_slice(), reporter).await?;

        // === 步骤 3: 写出结果 ===
        let paths = ExportPaths::for_input(
            path,
            &self.config.results_suffix,
            self.config.output_format,
        );
        TableWriter.write_files(&batch.output, &paths)?;

        info!(
            total = batch.summary.total,
            elapsed = %batch.elapsed,
            "批量查询完成，结果已保存"
        );

        Ok(BatchFileResponse {
            batch,
            results_path: paths.results.display().to_string(),
            secondary_path: paths.secondary.as_ref().map(|p| p.display().to_string()),
        })
    }
}
