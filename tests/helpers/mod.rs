// ==========================================
// 集成测试公共辅助
// ==========================================
// 每个测试文件按需使用其中一部分
#![allow(dead_code)]

pub mod mock_collaborators;
pub mod mock_config;
pub mod test_data_builder;
