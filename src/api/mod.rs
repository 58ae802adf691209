// ==========================================
// 人力就绪度引擎 - API 层
// ==========================================
// 职责: 提供展示层调用的门面
// ==========================================

pub mod error;
pub mod readiness_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use readiness_api::{ReadinessApi, ReadinessCollaborators, ReadinessView};
