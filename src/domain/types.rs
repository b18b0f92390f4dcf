// ==========================================
// CNPJ 批量查询 - 领域类型定义
// ==========================================
// 职责: 查询结果状态标签
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 查询状态 (Query Status)
// ==========================================
// 每个 CNPJ 只产生一种状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryStatus {
    Invalid,      // 校验未通过，未发起查询
    NotCompleted, // 已发起查询，协作方返回业务错误
    Completed,    // 查询成功
}

impl QueryStatus {
    /// 结果表中的状态文本
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Invalid => "Query Invalid",
            QueryStatus::NotCompleted => "Query Not Completed",
            QueryStatus::Completed => "Query Completed",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(QueryStatus::Invalid.to_string(), "Query Invalid");
        assert_eq!(QueryStatus::NotCompleted.to_string(), "Query Not Completed");
        assert_eq!(QueryStatus::Completed.to_string(), "Query Completed");
    }
}
