// ==========================================
// CNPJ 批量查询 - 耗时预估
// ==========================================
// 规则: 预计结束 = 开始时间 + CNPJ 数量 × 每次查询间隔
// 纯计算，无副作用
// ==========================================

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 展示用日期时间格式
pub const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// 时长拆分（时 / 分 / 秒，不足一秒的部分截断）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_duration(duration: Duration) -> Self {
        let total = duration.as_secs();
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// 批次耗时预估
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEstimate {
    pub total: usize,
    pub started_at: DateTime<Local>,
    pub estimated_end: DateTime<Local>,
    pub total_duration: Duration,
    pub breakdown: DurationBreakdown,
}

/// 计算批次耗时预估
///
/// # 参数
/// - total: CNPJ 数量
/// - delay: 每次查询后的固定间隔
/// - started_at: 开始时间（由调用方传入，便于测试）
pub fn estimate_batch(total: usize, delay: Duration, started_at: DateTime<Local>) -> BatchEstimate {
    let total_duration = delay.saturating_mul(u32::try_from(total).unwrap_or(u32::MAX));

    // 超出 chrono 可表示范围时退化为开始时间
    let estimated_end = chrono::Duration::from_std(total_duration)
        .ok()
        .and_then(|d| started_at.checked_add_signed(d))
        .unwrap_or(started_at);

    BatchEstimate {
        total,
        started_at,
        estimated_end,
        total_duration,
        breakdown: DurationBreakdown::from_duration(total_duration),
    }
}

impl fmt::Display for BatchEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CNPJs in file: {}", self.total)?;
        writeln!(
            f,
            "Start: {}",
            self.started_at.format(DISPLAY_DATETIME_FORMAT)
        )?;
        writeln!(
            f,
            "Estimated end: {}",
            self.estimated_end.format(DISPLAY_DATETIME_FORMAT)
        )?;
        write!(f, "Total time to process the queries: {}", self.breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 12, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_estimate_basic() {
        let estimate = estimate_batch(10, Duration::from_secs(5), start());
        assert_eq!(estimate.total_duration, Duration::from_secs(50));
        assert_eq!(estimate.estimated_end, start() + chrono::Duration::seconds(50));
        assert_eq!(
            estimate.breakdown,
            DurationBreakdown {
                hours: 0,
                minutes: 0,
                seconds: 50
            }
        );
    }

    #[test]
    fn test_estimate_breakdown_hours() {
        // 1000 × 5s = 5000s = 1h 23m 20s
        let estimate = estimate_batch(1000, Duration::from_secs(5), start());
        assert_eq!(estimate.breakdown.to_string(), "01:23:20");
    }

    #[test]
    fn test_estimate_empty_batch() {
        let estimate = estimate_batch(0, Duration::from_secs(5), start());
        assert_eq!(estimate.estimated_end, estimate.started_at);
        assert_eq!(estimate.breakdown.to_string(), "00:00:00");
    }

    #[test]
    fn test_breakdown_truncates_subsecond() {
        let b = DurationBreakdown::from_duration(Duration::from_millis(61_900));
        assert_eq!(b.to_string(), "00:01:01");
    }

    #[test]
    fn test_display() {
        let text = estimate_batch(2, Duration::from_secs(5), start()).to_string();
        assert!(text.contains("CNPJs in file: 2"));
        assert!(text.contains("Start: 12/06/2024 08:00:00"));
        assert!(text.contains("Estimated end: 12/06/2024 08:00:10"));
        assert!(text.ends_with("00:00:10"));
    }
}
