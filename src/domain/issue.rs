// ==========================================
// 人力就绪度引擎 - 问题 (Issue) 领域模型
// ==========================================
// 来源: 上游分类问题源 (外部协作方)
// 红线: 严重度只由上游重新评估改变, 本核心不修改
// ==========================================

use crate::domain::types::{IssueType, Severity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Issue - 单个岗位/班次/日期上的人员或合规问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    // ===== 标识 =====
    pub issue_id: String, // 在当前问题集合内唯一

    // ===== 分类 =====
    pub severity: Severity,
    pub issue_type: IssueType,

    // ===== 定位 =====
    pub station_id: Option<String>,
    pub station_name: Option<String>,
    #[serde(default)]
    pub line: Option<String>, // 所属产线 (问题源按产线筛选时携带)
    pub shift_code: String,
    pub date: NaiveDate,

    // ===== 解释 =====
    #[serde(default)]
    pub root_cause: Option<RootCause>,

    #[serde(default)]
    pub resolved: bool,
}

/// 结构化根因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootCause {
    pub primary: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl Issue {
    /// 是否计入活动统计
    pub fn is_open(&self) -> bool {
        !self.resolved
    }

    /// 展示用岗位名称: 名称 → ID → "Unassigned"
    pub fn station_label(&self) -> &str {
        self.station_name
            .as_deref()
            .or(self.station_id.as_deref())
            .unwrap_or("Unassigned")
    }

    /// 是否属于给定班次 (班次为空时视为通配)
    pub fn in_shift(&self, shift_code: &str) -> bool {
        self.shift_code.is_empty()
            || shift_code.is_empty()
            || self.shift_code.eq_ignore_ascii_case(shift_code)
    }

    /// 是否属于给定产线 (问题未携带产线时视为已由问题源过滤)
    pub fn on_line(&self, line: &str) -> bool {
        match self.line.as_deref() {
            Some(own) => own.eq_ignore_ascii_case(line),
            None => true,
        }
    }
}
