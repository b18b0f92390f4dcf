// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod mock_lookup;
pub mod recording_reporter;
pub mod test_data_builder;
