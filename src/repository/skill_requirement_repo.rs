// ==========================================
// 人力就绪度引擎 - 技能需求查询 Trait
// ==========================================
// 职责: 按产线或岗位查询 (岗位, 必需技能) 记录
// 说明: 查询失败由调用方降级为通用提示, 不视为错误
// ==========================================

use crate::domain::scenario::ScenarioInput;
use crate::domain::skill::SkillRequirement;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 查询范围
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementScope {
    Line(String),
    Station(String),
}

impl RequirementScope {
    /// 情景对应的查询范围
    pub fn for_scenario(scenario: &ScenarioInput) -> Self {
        match scenario {
            ScenarioInput::AddStation { station, .. } => RequirementScope::Station(station.clone()),
            ScenarioInput::IncreaseDemand { line, .. }
            | ScenarioInput::RemoveCapacity { line, .. } => RequirementScope::Line(line.clone()),
        }
    }
}

#[async_trait]
pub trait SkillRequirementLookup: Send + Sync {
    async fn requirements_for(
        &self,
        scope: &RequirementScope,
    ) -> RepositoryResult<Vec<SkillRequirement>>;
}
