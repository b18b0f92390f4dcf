// ==========================================
// CNPJ 批量查询 - 进度上报
// ==========================================
// 职责: 定义进度上报 trait，管道只依赖 trait，不依赖展示层
// 说明: 控制台 / GUI / 日志由调用方实现
// ==========================================

use crate::engine::estimate::BatchEstimate;
use serde::{Deserialize, Serialize};

/// 批次进度
///
/// processed 从 0 单调递增到 total，每处理完一个 CNPJ 加 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self { processed: 0, total }
    }

    pub fn is_finished(&self) -> bool {
        self.processed >= self.total
    }

    /// 完成百分比（空批次视为 100%）
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 * 100.0 / self.total as f64
        }
    }
}

// ==========================================
// 进度上报 Trait
// ==========================================

/// 进度上报者
///
/// 由管道同步调用，实现方不应长时间阻塞
pub trait ProgressReporter: Send + Sync {
    /// 批次开始前调用一次（进度已归零）
    fn on_start(&self, _estimate: &BatchEstimate) {}

    /// 每处理完一个 CNPJ 调用一次
    fn on_progress(&self, progress: BatchProgress);
}

/// 空操作上报者
///
/// 用于不需要进度展示的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpProgressReporter;

impl ProgressReporter for NoOpProgressReporter {
    fn on_progress(&self, _progress: BatchProgress) {}
}

/// 日志上报者
///
/// 通过 tracing 输出开始预估与每条进度
#[derive(Debug, Clone, Default)]
pub struct TracingProgressReporter;

impl ProgressReporter for TracingProgressReporter {
    fn on_start(&self, estimate: &BatchEstimate) {
        tracing::info!(
            total = estimate.total,
            estimated_end = %estimate.estimated_end.format(crate::engine::estimate::DISPLAY_DATETIME_FORMAT),
            total_time = %estimate.breakdown,
            "批量查询开始"
        );
    }

    fn on_progress(&self, progress: BatchProgress) {
        tracing::info!(
            processed = progress.processed,
            total = progress.total,
            "批量查询进度 {:.1}%",
            progress.percent()
        );
    }
}

/// 闭包作为上报者
impl<F> ProgressReporter for F
where
    F: Fn(BatchProgress) + Send + Sync,
{
    fn on_progress(&self, progress: BatchProgress) {
        self(progress)
    }
}
