// ==========================================
// 人力就绪度引擎 - 问题源 Trait
// ==========================================
// 职责: 定义分类问题源的读取接口 (不包含实现)
// 红线: 每次刷新都以问题源为准
// ==========================================

use crate::domain::issue::Issue;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 问题源查询条件 (日期/班次/产线选择)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueQuery {
    pub date: NaiveDate,
    pub shift_code: Option<String>,
    pub line: Option<String>,
    #[serde(default)]
    pub include_resolved: bool,
}

impl IssueQuery {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            shift_code: None,
            line: None,
            include_resolved: false,
        }
    }

    pub fn shift(mut self, shift_code: &str) -> Self {
        self.shift_code = Some(shift_code.to_string());
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.line = Some(line.to_string());
        self
    }

    pub fn with_resolved(mut self) -> Self {
        self.include_resolved = true;
        self
    }

    /// 问题是否落在查询范围内 (供内存问题源过滤)
    pub fn matches(&self, issue: &Issue) -> bool {
        issue.date == self.date
            && (self.include_resolved || issue.is_open())
            && self.shift_code.as_deref().map_or(true, |s| issue.in_shift(s))
            && self.line.as_deref().map_or(true, |l| issue.on_line(l))
    }
}

// ==========================================
// IssueFeed Trait
// ==========================================
// 实现者: 远端数据存储适配器 (本 crate 之外)
#[async_trait]
pub trait IssueFeed: Send + Sync {
    /// 拉取当前问题
    ///
    /// # 返回
    /// - 未解决问题; include_resolved 时同时返回已解决问题
    async fn fetch_issues(&self, query: &IssueQuery) -> RepositoryResult<Vec<Issue>>;
}
