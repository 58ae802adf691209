// ==========================================
// 人力就绪度引擎 - 技能需求参考数据
// ==========================================
// 来源: 技能需求查询协作方 (外部)
// 用途: 情景对比中的 top_blockers 标签与基线缺口计数
// ==========================================

use serde::{Deserialize, Serialize};

/// 岗位-技能需求记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub station_id: String,
    #[serde(default)]
    pub station_name: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    pub skill: String,
    #[serde(default = "default_required")]
    pub required_count: u32,
    #[serde(default)]
    pub qualified_count: u32,
}

fn default_required() -> u32 {
    1
}

impl SkillRequirement {
    /// 缺口人数
    pub fn gap(&self) -> u32 {
        self.required_count.saturating_sub(self.qualified_count)
    }

    pub fn is_unmet(&self) -> bool {
        self.gap() > 0
    }

    /// "技能 at 岗位" 展示标签
    pub fn label(&self) -> String {
        let station = self.station_name.as_deref().unwrap_or(&self.station_id);
        format!("{} at {}", self.skill, station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_and_label() {
        let req = SkillRequirement {
            station_id: "ST-1".to_string(),
            station_name: Some("Weld Cell 1".to_string()),
            line: Some("Assembly".to_string()),
            skill: "MIG welding".to_string(),
            required_count: 2,
            qualified_count: 3,
        };
        assert_eq!(req.gap(), 0);
        assert!(!req.is_unmet());
        assert_eq!(req.label(), "MIG welding at Weld Cell 1");
    }
}
