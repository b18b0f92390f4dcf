// ==========================================
// CNPJ 批量查询 - 批量查询管道
// ==========================================
// 流程: 逐个 CNPJ → 校验 + 查询 → 规范化 → 追加两张表 → 上报进度 → 固定间隔
// 并发: 单循环顺序执行，不并行查询
// 红线: 单个 CNPJ 的 Invalid / Failed 不中断批次
// ==========================================

use crate::config::LookupConfig;
use crate::domain::{BatchOutput, ResultRow, SecondaryClassificationRow};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::estimate::{estimate_batch, BatchEstimate};
use crate::engine::normalizer::normalize;
use crate::engine::progress::{BatchProgress, ProgressReporter};
use crate::lookup::{consult, CnpjLookup};
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// CancellationFlag - 取消标记
// ==========================================
// 在两个 CNPJ 之间检查；正在进行的查询与间隔不会被打断
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ==========================================
// BatchPipeline - 批量查询管道
// ==========================================
pub struct BatchPipeline<L>
where
    L: CnpjLookup,
{
    // 查询协作方
    lookup: L,

    // 每次查询后的固定间隔
    delay: Duration,

    // 最后一个 CNPJ 之后是否仍然等待
    trailing_delay: bool,

    cancellation: Option<CancellationFlag>,
}

impl<L> BatchPipeline<L>
where
    L: CnpjLookup,
{
    /// 创建管道（默认保留末尾间隔，不可取消）
    pub fn new(lookup: L, delay: Duration) -> Self {
        Self {
            lookup,
            delay,
            trailing_delay: true,
            cancellation: None,
        }
    }

    /// 按配置创建管道
    pub fn from_config(lookup: L, config: &LookupConfig) -> Self {
        Self::new(lookup, config.delay).with_trailing_delay(config.trailing_delay)
    }

    pub fn with_trailing_delay(mut self, trailing_delay: bool) -> Self {
        self.trailing_delay = trailing_delay;
        self
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 批次耗时预估
    pub fn estimate(&self, total: usize, started_at: DateTime<Local>) -> BatchEstimate {
        estimate_batch(total, self.delay, started_at)
    }

    /// 执行批量查询（以当前时间预估）
    ///
    /// # 参数
    /// - identifiers: CNPJ 列表（原始文本，按输入顺序处理，不去重）
    /// - reporter: 进度上报者
    ///
    /// # 返回
    /// - Ok(BatchOutput): 结果表 + 次要 CNAE 表
    /// - Err(EngineError::Extraction): 成功记录缺少必需结构，批次中止
    /// - Err(EngineError::Cancelled): 取消标记被置位
    pub async fn run<S>(
        &self,
        identifiers: &[S],
        reporter: &dyn ProgressReporter,
    ) -> EngineResult<BatchOutput>
    where
        S: AsRef<str> + Sync,
    {
        let estimate = self.estimate(identifiers.len(), Local::now());
        self.run_with_estimate(identifiers, &estimate, reporter).await
    }

    /// 执行批量查询（使用调用方已计算的预估）
    ///
    /// 该预估原样交给 reporter.on_start
    #[instrument(skip_all, fields(batch_id = tracing::field::Empty, total = identifiers.len()))]
    pub async fn run_with_estimate<S>(
        &self,
        identifiers: &[S],
        estimate: &BatchEstimate,
        reporter: &dyn ProgressReporter,
    ) -> EngineResult<BatchOutput>
    where
        S: AsRef<str> + Sync,
    {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let total = identifiers.len();
        let mut progress = BatchProgress::new(total);
        info!(
            batch_id = %batch_id,
            total = total,
            delay_ms = self.delay.as_millis() as u64,
            "开始批量查询"
        );
        reporter.on_start(estimate);

        let mut output = BatchOutput {
            results: Vec::with_capacity(total),
            secondary: Vec::new(),
        };

        for (idx, raw) in identifiers.iter().enumerate() {
            let raw = raw.as_ref();

            if let Some(flag) = &self.cancellation {
                if flag.is_cancelled() {
                    info!(processed = idx, total = total, "批量查询已取消");
                    return Err(EngineError::Cancelled {
                        processed: idx,
                        total,
                    });
                }
            }

            // === 步骤 1: 校验 + 查询 ===
            let outcome = consult(&self.lookup, raw).await;

            // === 步骤 2: 规范化 ===
            let normalized = normalize(&outcome).map_err(|source| {
                error!(cnpj = %raw, error = %source, "登记记录提取失败，批次中止");
                EngineError::Extraction {
                    cnpj: raw.to_string(),
                    source,
                }
            })?;
            debug!(cnpj = %raw, status = %normalized.status, "CNPJ 处理完成");

            // === 步骤 3: 追加结果 ===
            output.results.push(ResultRow {
                cnpj: raw.to_string(),
                processed_at: Local::now(),
                status: normalized.status,
                fields: normalized.fields,
            });
            output.secondary.extend(
                normalized
                    .secondary
                    .into_iter()
                    .map(|entry| SecondaryClassificationRow::from_entry(raw, entry)),
            );

            // === 步骤 4: 上报进度 ===
            progress.processed += 1;
            reporter.on_progress(progress);

            // === 步骤 5: 固定间隔 ===
            let is_last = idx + 1 == total;
            if !self.delay.is_zero() && (self.trailing_delay || !is_last) {
                tokio::time::sleep(self.delay).await;
            }
        }

        let summary = output.summary();
        info!(
            batch_id = %batch_id,
            total = summary.total,
            completed = summary.completed,
            not_completed = summary.not_completed,
            invalid = summary.invalid,
            secondary = summary.secondary_classifications,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "批量查询完成"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QueryStatus, RegistryRecord};
    use crate::engine::progress::NoOpProgressReporter;
    use crate::lookup::{LookupError, LookupResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubLookup;

    #[async_trait]
    impl CnpjLookup for StubLookup {
        async fn lookup(&self, cnpj: &str) -> LookupResult<RegistryRecord> {
            if cnpj == "45398765000160" {
                return Err(LookupError::NotFound(cnpj.to_string()));
            }
            Ok(RegistryRecord::from_value(json!({
                "razao_social": format!("EMPRESA {}", cnpj),
                "endereco": {
                    "tipo_logradouro": "AV", "logradouro": "PAULISTA", "numero": "1000",
                    "bairro": "BELA VISTA", "municipio": "SAO PAULO", "uf": "SP", "cep": "01310100"
                },
                "cnae_fiscal_principal": { "codigo": "6201501", "nome": "Software" },
                "cnae_fiscal_secundaria": [{ "codigo": "6202300", "nome": "Licenciamento" }]
            }))
            .unwrap())
        }
    }

    #[tokio::test]
    async fn test_run_mixed_batch() {
        let pipeline = BatchPipeline::new(StubLookup, Duration::ZERO);
        let ids = ["11.222.333/0001-81", "123", "45398765000160"];

        let output = pipeline.run(&ids, &NoOpProgressReporter).await.unwrap();

        assert_eq!(output.results.len(), 3);
        assert_eq!(output.results[0].status, QueryStatus::Completed);
        assert_eq!(output.results[0].cnpj, "11.222.333/0001-81");
        assert_eq!(output.results[1].status, QueryStatus::Invalid);
        assert_eq!(output.results[2].status, QueryStatus::NotCompleted);
        assert_eq!(output.secondary.len(), 1);
        assert_eq!(output.secondary[0].cnpj, "11.222.333/0001-81");
    }

    #[tokio::test]
    async fn test_progress_counts_up() {
        let pipeline = BatchPipeline::new(StubLookup, Duration::ZERO);
        let seen = Mutex::new(Vec::new());
        let reporter = |p: BatchProgress| seen.lock().unwrap().push((p.processed, p.total));

        pipeline
            .run(&["11222333000181", "x", "y"], &reporter)
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let pipeline =
            BatchPipeline::new(StubLookup, Duration::ZERO).with_cancellation(flag.clone());

        let err = pipeline
            .run(&["11222333000181"], &NoOpProgressReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Cancelled { processed: 0, total: 1 }));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let pipeline = BatchPipeline::new(StubLookup, Duration::from_secs(5));
        let ids: Vec<String> = Vec::new();
        let output = pipeline.run(&ids, &NoOpProgressReporter).await.unwrap();
        assert!(output.results.is_empty());
        assert!(output.secondary.is_empty());
    }
}
