// ==========================================
// Mock 配置 - 用于集成测试
// ==========================================

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use workforce_readiness::config::EngineConfig;
use workforce_readiness::engine::ManualClock;

/// 默认标定 (BLOCKING 25 分 / WARNING 8 分, 上限 100, 撤销窗口 30 秒)
pub fn default_config() -> EngineConfig {
    EngineConfig::default()
}

/// 快速轮询, 供撤销倒计时测试使用
pub fn fast_poll_config() -> EngineConfig {
    EngineConfig {
        undo_poll_interval_ms: 10,
        ..EngineConfig::default()
    }
}

/// 自定义上限
pub fn with_fragility_cap(cap: i32) -> EngineConfig {
    EngineConfig {
        fragility_cap: cap,
        ..EngineConfig::default()
    }
}

/// 固定起点的手动时钟
pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
    ))
}
