// ==========================================
// 人力就绪度引擎 - 脆弱度聚合器
// ==========================================
// 职责: 问题集合 → 脆弱度指数 (0..=100) + 三态就绪结论 + 重点岗位
// 输入: 问题快照 (只读)
// 红线: 无失败模式, 空集合 → {0, GO, 计数全 0}
// ==========================================

use crate::config::EngineConfig;
use crate::domain::issue::Issue;
use crate::domain::types::{IssueType, ReadinessVerdict, Severity};
use crate::engine::exposure::ExposureModel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// 聚合结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    pub fragility_index: i32,
    pub verdict: ReadinessVerdict,
    pub blocking_count: u32,
    pub warning_count: u32,
    pub illegal_count: u32,
    pub unstaffed_count: u32,
    pub top_stations: Vec<TopStation>,
}

/// 重点岗位条目 (每个岗位取其最严重的问题)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopStation {
    pub issue_id: String,
    pub station_id: Option<String>,
    pub station_label: String,
    pub severity: Severity,
    pub issue_type: IssueType,
    pub shift_code: String,
    pub date: NaiveDate,
    pub primary_cause: Option<String>,
}

impl TopStation {
    fn from_issue(issue: &Issue) -> Self {
        Self {
            issue_id: issue.issue_id.clone(),
            station_id: issue.station_id.clone(),
            station_label: issue.station_label().to_string(),
            severity: issue.severity,
            issue_type: issue.issue_type,
            shift_code: issue.shift_code.clone(),
            date: issue.date,
            primary_cause: issue.root_cause.as_ref().map(|c| c.primary.clone()),
        }
    }
}

// ==========================================
// FragilityAggregator
// ==========================================
// 无状态, 所有方法都是纯函数
#[derive(Debug, Clone)]
pub struct FragilityAggregator {
    model: ExposureModel,
    fragility_cap: i32,
    top_stations_limit: usize,
}

impl FragilityAggregator {
    pub fn new(model: ExposureModel, fragility_cap: i32, top_stations_limit: usize) -> Self {
        Self {
            model,
            fragility_cap,
            top_stations_limit,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            ExposureModel::new(&config.exposure),
            config.fragility_cap,
            config.top_stations_limit,
        )
    }

    pub fn model(&self) -> &ExposureModel {
        &self.model
    }

    pub fn fragility_cap(&self) -> i32 {
        self.fragility_cap
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 聚合问题集合
    ///
    /// # 步骤
    /// 1. 只统计未解决问题, 按严重度与类型计数
    /// 2. 脆弱度 = min(cap, B * pts(B) + W * pts(W))
    /// 3. 按优先级判定结论
    /// 4. 生成重点岗位排名
    pub fn aggregate(&self, issues: &[Issue]) -> ReadinessSummary {
        let mut blocking_count = 0u32;
        let mut warning_count = 0u32;
        let mut illegal_count = 0u32;
        let mut unstaffed_count = 0u32;

        for issue in issues.iter().filter(|i| i.is_open()) {
            match issue.severity {
                Severity::Blocking => blocking_count += 1,
                Severity::Warning => warning_count += 1,
            }
            match issue.issue_type {
                IssueType::Illegal => illegal_count += 1,
                IssueType::Unstaffed => unstaffed_count += 1,
                _ => {}
            }
        }

        let fragility_index = self.fragility_index(blocking_count, warning_count);
        let verdict = Self::verdict_for(illegal_count, blocking_count, warning_count);
        let top_stations = self.rank_stations(issues);

        tracing::debug!(
            "脆弱度聚合: fragility={}, verdict={}, blocking={}, warning={}, illegal={}",
            fragility_index,
            verdict,
            blocking_count,
            warning_count,
            illegal_count
        );

        ReadinessSummary {
            fragility_index,
            verdict,
            blocking_count,
            warning_count,
            illegal_count,
            unstaffed_count,
            top_stations,
        }
    }

    /// 脆弱度指数, 封顶于 cap
    pub fn fragility_index(&self, blocking_count: u32, warning_count: u32) -> i32 {
        let raw = i64::from(blocking_count) * i64::from(self.model.fragility_points(Severity::Blocking))
            + i64::from(warning_count) * i64::from(self.model.fragility_points(Severity::Warning));
        raw.clamp(0, i64::from(self.fragility_cap)) as i32
    }

    /// 就绪结论 (先匹配先生效)
    ///
    /// - ILLEGAL > 0 → NO-GO
    /// - BLOCKING > 0 → NO-GO
    /// - WARNING > 0 → WARNING
    /// - 否则 GO
    pub fn verdict_for(illegal_count: u32, blocking_count: u32, warning_count: u32) -> ReadinessVerdict {
        if illegal_count > 0 {
            ReadinessVerdict::NoGo
        } else if blocking_count > 0 {
            ReadinessVerdict::NoGo
        } else if warning_count > 0 {
            ReadinessVerdict::Warning
        } else {
            ReadinessVerdict::Go
        }
    }

    /// 重点岗位排名
    ///
    /// 排序键: (严重度, 类型优先级), 稳定排序, 平局保持输入顺序
    /// 同一岗位只保留排在最前的一条; 无岗位的问题不合并
    pub fn rank_stations(&self, issues: &[Issue]) -> Vec<TopStation> {
        let mut open: Vec<&Issue> = issues.iter().filter(|i| i.is_open()).collect();
        open.sort_by_key(|i| (i.severity, i.issue_type.priority()));

        let mut seen: HashSet<&str> = HashSet::new();
        open.into_iter()
            .filter(|i| match i.station_id.as_deref() {
                Some(id) => seen.insert(id),
                None => true,
            })
            .take(self.top_stations_limit)
            .map(TopStation::from_issue)
            .collect()
    }
}

impl Default for FragilityAggregator {
    fn default() -> Self {
        Self::new(ExposureModel::default(), 100, 8)
    }
}
