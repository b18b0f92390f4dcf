// ==========================================
// 记录型进度上报者 - 用于集成测试
// ==========================================

use cnpj_batch_lookup::engine::{BatchEstimate, BatchProgress, ProgressReporter};
use std::sync::Mutex;

/// 记录 on_start 收到的预估与每次进度
#[derive(Debug, Default)]
pub struct RecordingReporter {
    started: Mutex<Vec<BatchEstimate>>,
    progress: Mutex<Vec<BatchProgress>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// on_start 收到的预估（按调用顺序）
    pub fn started(&self) -> Vec<BatchEstimate> {
        self.started.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<BatchProgress> {
        self.progress.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn on_start(&self, estimate: &BatchEstimate) {
        self.started.lock().unwrap().push(estimate.clone());
    }

    fn on_progress(&self, progress: BatchProgress) {
        self.progress.lock().unwrap().push(progress);
    }
}
