// ==========================================
// 人力就绪度引擎 - 配置层
// ==========================================
// 职责: 引擎标定配置, 支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{ConfigError, EngineConfig, ExposureCalibration, SeverityCalibration};
