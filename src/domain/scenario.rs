// ==========================================
// 人力就绪度引擎 - 情景模拟领域模型
// ==========================================
// 职责: 情景输入 (三种互不相关的参数集)、模拟结果、整改计划项
// ==========================================

use crate::domain::exposure::ExposureSnapshot;
use crate::domain::types::PlanOwner;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ScenarioInput - 情景输入 (按 kind 区分)
// ==========================================
// 每个分支只携带自己的字段, 不引用任何问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioInput {
    /// 新增一个岗位
    AddStation {
        station: String,
        skill: String,
        shift: String,
    },
    /// 产线需求工时增加
    IncreaseDemand {
        line: String,
        delta_hours: f64,
        shift: String,
    },
    /// 产线减少人员
    RemoveCapacity {
        line: String,
        people_removed: i32,
        shift: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioKind {
    AddStation,
    IncreaseDemand,
    RemoveCapacity,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::AddStation => write!(f, "ADD_STATION"),
            ScenarioKind::IncreaseDemand => write!(f, "INCREASE_DEMAND"),
            ScenarioKind::RemoveCapacity => write!(f, "REMOVE_CAPACITY"),
        }
    }
}

impl ScenarioInput {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioInput::AddStation { .. } => ScenarioKind::AddStation,
            ScenarioInput::IncreaseDemand { .. } => ScenarioKind::IncreaseDemand,
            ScenarioInput::RemoveCapacity { .. } => ScenarioKind::RemoveCapacity,
        }
    }

    pub fn shift(&self) -> &str {
        match self {
            ScenarioInput::AddStation { shift, .. }
            | ScenarioInput::IncreaseDemand { shift, .. }
            | ScenarioInput::RemoveCapacity { shift, .. } => shift,
        }
    }

    /// 产线类情景返回产线, 岗位类情景返回 None
    pub fn line(&self) -> Option<&str> {
        match self {
            ScenarioInput::AddStation { .. } => None,
            ScenarioInput::IncreaseDemand { line, .. }
            | ScenarioInput::RemoveCapacity { line, .. } => Some(line),
        }
    }

    /// 边界截断: 负数/NaN 归零 (规划工具, 不拒绝输入)
    pub fn sanitized(&self) -> ScenarioInput {
        match self {
            ScenarioInput::AddStation { .. } => self.clone(),
            ScenarioInput::IncreaseDemand { line, delta_hours, shift } => {
                let hours = if delta_hours.is_finite() { delta_hours.max(0.0) } else { 0.0 };
                ScenarioInput::IncreaseDemand {
                    line: line.clone(),
                    delta_hours: hours,
                    shift: shift.clone(),
                }
            }
            ScenarioInput::RemoveCapacity { line, people_removed, shift } => {
                ScenarioInput::RemoveCapacity {
                    line: line.clone(),
                    people_removed: (*people_removed).max(0),
                    shift: shift.clone(),
                }
            }
        }
    }
}

// ==========================================
// PlanItem - 整改计划项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub title: String,
    pub owner: PlanOwner,
    pub eta_weeks: u32,
    pub outcome: String, // 由计算出的 delta 插值生成
}

// ==========================================
// ScenarioResult - 情景对比结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub kind: ScenarioKind,
    pub current: ExposureSnapshot,
    pub after: ExposureSnapshot,
    pub delta: ExposureSnapshot,
    pub top_blockers: Vec<String>,
    pub plan: Vec<PlanItem>,
}
