// ==========================================
// 人力就绪度引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod decision;
pub mod exposure;
pub mod issue;
pub mod scenario;
pub mod skill;
pub mod types;

// 重导出核心类型
pub use decision::{DecisionState, DecisionWriteRequest, UndoWindow};
pub use exposure::{ExposureRange, ExposureSnapshot, ExposureUnit};
pub use issue::{Issue, RootCause};
pub use scenario::{PlanItem, ScenarioInput, ScenarioKind, ScenarioResult};
pub use skill::SkillRequirement;
pub use types::{DecisionAction, IssueType, PlanOwner, ReadinessVerdict, Severity};
