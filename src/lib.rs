// ==========================================
// 人力就绪度引擎 - 核心库
// ==========================================
// 职责: 岗位人力问题 → 脆弱度指数 + 三态就绪结论
//       情景对比 (新增岗位 / 需求增加 / 人员减少)
//       决策生命周期 (乐观移除 + 撤销窗口 + 远端写入回滚)
// 系统定位: 决策支持系统 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 协作方接口层 - 问题源 / 决策写入 / 技能需求
pub mod repository;

// 引擎层 - 纯计算与决策状态机
pub mod engine;

// 配置层 - 引擎标定
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 展示层门面
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DecisionAction, IssueType, PlanOwner, ReadinessVerdict, Severity};

// 领域实体
pub use domain::{
    DecisionState, DecisionWriteRequest, ExposureRange, ExposureSnapshot, ExposureUnit, Issue,
    PlanItem, RootCause, ScenarioInput, ScenarioKind, ScenarioResult, SkillRequirement,
    UndoWindow,
};

// 引擎
pub use engine::{
    DecisionLifecycle, ExposureModel, FragilityAggregator, ReadinessSummary, ScenarioComparator,
    TopStation,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// API
pub use api::{ApiError, ApiResult, ReadinessApi, ReadinessCollaborators};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "人力就绪度引擎";
