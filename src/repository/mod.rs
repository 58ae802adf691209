// ==========================================
// 人力就绪度引擎 - 外部协作方接口层
// ==========================================
// 红线: 只定义接口, 不含存储实现, 不含业务逻辑
// ==========================================
// 职责: 问题源 / 决策写入 / 技能需求查询
// ==========================================

pub mod decision_writer;
pub mod error;
pub mod issue_feed;
pub mod skill_requirement_repo;

// 重导出核心接口
pub use decision_writer::DecisionWriter;
pub use error::{RepositoryError, RepositoryResult};
pub use issue_feed::{IssueFeed, IssueQuery};
pub use skill_requirement_repo::{RequirementScope, SkillRequirementLookup};
