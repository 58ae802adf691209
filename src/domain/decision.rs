// ==========================================
// 人力就绪度引擎 - 决策领域模型
// ==========================================
// 职责: 决策写入载荷、撤销窗口、决策状态
// 红线: 同一时刻最多存在一个撤销窗口
// ==========================================

use crate::domain::issue::Issue;
use crate::domain::types::{DecisionAction, IssueType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// DecisionWriteRequest - 发往远端的决策载荷
// ==========================================
// 远端视角下为原子写入, 无部分成功
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionWriteRequest {
    pub decision_id: Uuid,
    pub issue_id: String,
    pub date: NaiveDate,
    pub shift_code: String,
    pub station_id: Option<String>,
    pub issue_type: IssueType,
    pub action: DecisionAction,
}

impl DecisionWriteRequest {
    pub fn for_issue(decision_id: Uuid, issue: &Issue, action: DecisionAction) -> Self {
        Self {
            decision_id,
            issue_id: issue.issue_id.clone(),
            date: issue.date,
            shift_code: issue.shift_code.clone(),
            station_id: issue.station_id.clone(),
            issue_type: issue.issue_type,
            action,
        }
    }
}

// ==========================================
// UndoWindow - 撤销窗口
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoWindow {
    pub decision_id: Uuid,
    pub action: DecisionAction,
    pub resolved_issue: Issue,
    pub expires_at: DateTime<Utc>,
}

impl UndoWindow {
    /// 以 expires_at 与当前时间比较判断, 不依赖计时次数
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// 剩余整秒数 (向上取整, 过期为 0)
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        let ms = (self.expires_at - now).num_milliseconds();
        if ms <= 0 {
            0
        } else {
            ((ms + 999) / 1000) as u64
        }
    }
}

// ==========================================
// DecisionState - 单个决策的状态
// ==========================================
// Open → PendingWrite → {Committed, RolledBack}
// Committed --undo--> Open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionState {
    Open,
    PendingWrite,
    Committed,
    RolledBack,
}

impl fmt::Display for DecisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionState::Open => write!(f, "OPEN"),
            DecisionState::PendingWrite => write!(f, "PENDING_WRITE"),
            DecisionState::Committed => write!(f, "COMMITTED"),
            DecisionState::RolledBack => write!(f, "ROLLED_BACK"),
        }
    }
}
