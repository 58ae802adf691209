// ==========================================
// 人力就绪度引擎 - 引擎层
// ==========================================
// 职责: 纯计算 (暴露量/脆弱度/情景对比) + 决策状态机
// 红线: 引擎不访问问题源/远端, 只处理调用方传入的快照
// ==========================================

pub mod clock;
pub mod decision_lifecycle;
pub mod events;
pub mod exposure;
pub mod fragility;
pub mod scenario;

// 重导出核心引擎
pub use clock::{Clock, ManualClock, SystemClock};
pub use decision_lifecycle::{
    AppliedDecision, DecisionLifecycle, LifecycleError, WriteOutcome, WriteResolution,
};
pub use events::{
    DecisionEvent, DecisionEventPublisher, DecisionEventType, NoOpEventPublisher,
    RecordingEventPublisher,
};
pub use exposure::{Exposure, ExposureModel};
pub use fragility::{FragilityAggregator, ReadinessSummary, TopStation};
pub use scenario::ScenarioComparator;

