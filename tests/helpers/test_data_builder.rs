// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use workforce_readiness::domain::types::{IssueType, Severity};
use workforce_readiness::domain::{Issue, RootCause, SkillRequirement};

/// 测试默认日期
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

// ==========================================
// Issue 构建器
// ==========================================

pub struct IssueBuilder {
    issue_id: String,
    severity: Severity,
    issue_type: IssueType,
    station_id: Option<String>,
    station_name: Option<String>,
    line: Option<String>,
    shift_code: String,
    date: NaiveDate,
    root_cause: Option<RootCause>,
    resolved: bool,
}

impl IssueBuilder {
    /// 默认: WARNING / UNSTAFFED, 岗位 ST-<id>, A 班, Assembly 产线
    pub fn new(issue_id: &str) -> Self {
        Self {
            issue_id: issue_id.to_string(),
            severity: Severity::Warning,
            issue_type: IssueType::Unstaffed,
            station_id: Some(format!("ST-{}", issue_id)),
            station_name: None,
            line: Some("Assembly".to_string()),
            shift_code: "A".to_string(),
            date: test_date(),
            root_cause: None,
            resolved: false,
        }
    }

    pub fn blocking(mut self) -> Self {
        self.severity = Severity::Blocking;
        self
    }

    pub fn warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    pub fn issue_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = issue_type;
        self
    }

    /// ILLEGAL 问题总是 BLOCKING
    pub fn illegal(mut self) -> Self {
        self.issue_type = IssueType::Illegal;
        self.severity = Severity::Blocking;
        self
    }

    pub fn station(mut self, station_id: &str) -> Self {
        self.station_id = Some(station_id.to_string());
        self
    }

    pub fn station_name(mut self, name: &str) -> Self {
        self.station_name = Some(name.to_string());
        self
    }

    pub fn no_station(mut self) -> Self {
        self.station_id = None;
        self.station_name = None;
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.line = Some(line.to_string());
        self
    }

    pub fn shift(mut self, shift_code: &str) -> Self {
        self.shift_code = shift_code.to_string();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn cause(mut self, primary: &str) -> Self {
        self.root_cause = Some(RootCause {
            primary: primary.to_string(),
            details: Vec::new(),
        });
        self
    }

    pub fn resolved(mut self) -> Self {
        self.resolved = true;
        self
    }

    pub fn build(self) -> Issue {
        Issue {
            issue_id: self.issue_id,
            severity: self.severity,
            issue_type: self.issue_type,
            station_id: self.station_id,
            station_name: self.station_name,
            line: self.line,
            shift_code: self.shift_code,
            date: self.date,
            root_cause: self.root_cause,
            resolved: self.resolved,
        }
    }
}

/// 1 个 BLOCKING + 2 个 WARNING (脆弱度 41, NO-GO)
pub fn mixed_issue_set() -> Vec<Issue> {
    vec![
        IssueBuilder::new("I-1").blocking().station("ST-WELD").build(),
        IssueBuilder::new("I-2").warning().station("ST-PAINT").build(),
        IssueBuilder::new("I-3").warning().station("ST-PACK").build(),
    ]
}

// ==========================================
// SkillRequirement 构建
// ==========================================

pub fn requirement(station_id: &str, skill: &str, required: u32, qualified: u32) -> SkillRequirement {
    SkillRequirement {
        station_id: station_id.to_string(),
        station_name: None,
        line: Some("Assembly".to_string()),
        skill: skill.to_string(),
        required_count: required,
        qualified_count: qualified,
    }
}
