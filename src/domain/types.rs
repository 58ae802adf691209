// ==========================================
// 人力就绪度引擎 - 领域类型定义
// ==========================================
// 职责: 严重度、问题类型、就绪结论、决策动作等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与问题源一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 严重度 (Severity)
// ==========================================
// 顺序: Blocking < Warning (Blocking 排在前面, 更严重)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Blocking, // 硬性缺口 (覆盖/合规失败)
    Warning,  // 软风险
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Blocking => write!(f, "BLOCKING"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

// ==========================================
// 问题类型 (Issue Type)
// ==========================================
// 未识别的类型统一落入 Other, 不拒绝
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Illegal,   // 违反法规/合规
    Unstaffed, // 岗位无人
    NoGo,      // 资质不足, 不可开工
    #[serde(other)]
    Other,     // 其他
}

impl IssueType {
    /// 展示排序优先级 (越小越靠前)
    pub fn priority(&self) -> u8 {
        match self {
            IssueType::Illegal => 0,
            IssueType::Unstaffed => 1,
            IssueType::NoGo => 2,
            IssueType::Other => 3,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueType::Illegal => write!(f, "ILLEGAL"),
            IssueType::Unstaffed => write!(f, "UNSTAFFED"),
            IssueType::NoGo => write!(f, "NO_GO"),
            IssueType::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 就绪结论 (Readiness Verdict)
// ==========================================
// 顺序: Go < Warning < NoGo (越往后越差)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadinessVerdict {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl fmt::Display for ReadinessVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessVerdict::Go => write!(f, "GO"),
            ReadinessVerdict::Warning => write!(f, "WARNING"),
            ReadinessVerdict::NoGo => write!(f, "NO-GO"),
        }
    }
}

// ==========================================
// 决策动作 (Decision Action)
// ==========================================
// 写入远端时使用 snake_case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    Acknowledged,  // 已知悉
    PlanTraining,  // 安排培训
    Swap,          // 人员调换
    Escalate,      // 升级处理
}

impl DecisionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionAction::Acknowledged => "acknowledged",
            DecisionAction::PlanTraining => "plan_training",
            DecisionAction::Swap => "swap",
            DecisionAction::Escalate => "escalate",
        }
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 整改负责人 (Plan Owner)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanOwner {
    Ops,
    Supervisor,
    #[serde(rename = "HR")]
    Hr,
}

impl fmt::Display for PlanOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOwner::Ops => write!(f, "Ops"),
            PlanOwner::Supervisor => write!(f, "Supervisor"),
            PlanOwner::Hr => write!(f, "HR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Blocking < Severity::Warning);
        let mut v = vec![Severity::Warning, Severity::Blocking];
        v.sort();
        assert_eq!(v, vec![Severity::Blocking, Severity::Warning]);
    }

    #[test]
    fn test_issue_type_unknown_falls_back() {
        let t: IssueType = serde_json::from_str("\"SKILL_GAP\"").unwrap();
        assert_eq!(t, IssueType::Other);
        let t: IssueType = serde_json::from_str("\"NO_GO\"").unwrap();
        assert_eq!(t, IssueType::NoGo);
    }

    #[test]
    fn test_verdict_serialization() {
        assert_eq!(serde_json::to_string(&ReadinessVerdict::NoGo).unwrap(), "\"NO-GO\"");
        assert!(ReadinessVerdict::Go < ReadinessVerdict::Warning);
        assert!(ReadinessVerdict::Warning < ReadinessVerdict::NoGo);
    }

    #[test]
    fn test_decision_action_wire_format() {
        assert_eq!(
            serde_json::to_string(&DecisionAction::PlanTraining).unwrap(),
            "\"plan_training\""
        );
        assert_eq!(DecisionAction::Acknowledged.to_string(), "acknowledged");
    }
}
