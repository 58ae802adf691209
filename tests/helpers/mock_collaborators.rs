// ==========================================
// Mock 协作方 - 问题源 / 决策写入 / 技能需求
// ==========================================

use std::sync::Mutex;

use async_trait::async_trait;
use workforce_readiness::domain::{DecisionWriteRequest, Issue, SkillRequirement};
use workforce_readiness::repository::{
    DecisionWriter, IssueFeed, IssueQuery, RepositoryError, RepositoryResult, RequirementScope,
    SkillRequirementLookup,
};

// ==========================================
// 内存问题源
// ==========================================

#[derive(Default)]
pub struct InMemoryIssueFeed {
    issues: Mutex<Vec<Issue>>,
    unavailable: Mutex<bool>,
}

impl InMemoryIssueFeed {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            unavailable: Mutex::new(false),
        }
    }

    pub fn set_issues(&self, issues: Vec<Issue>) {
        *self.issues.lock().unwrap() = issues;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }
}

#[async_trait]
impl IssueFeed for InMemoryIssueFeed {
    async fn fetch_issues(&self, query: &IssueQuery) -> RepositoryResult<Vec<Issue>> {
        if *self.unavailable.lock().unwrap() {
            return Err(RepositoryError::Unavailable("feed offline".to_string()));
        }
        Ok(self
            .issues
            .lock()
            .unwrap()
            .iter()
            .filter(|i| query.matches(i))
            .cloned()
            .collect())
    }
}

// ==========================================
// 可脚本化的决策写入
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterMode {
    Accept,
    Unavailable,
    Reject,
}

pub struct ScriptedDecisionWriter {
    mode: Mutex<WriterMode>,
    submitted: Mutex<Vec<DecisionWriteRequest>>,
}

impl ScriptedDecisionWriter {
    pub fn new(mode: WriterMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(WriterMode::Accept)
    }

    pub fn set_mode(&self, mode: WriterMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn submitted(&self) -> Vec<DecisionWriteRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionWriter for ScriptedDecisionWriter {
    async fn submit(&self, request: &DecisionWriteRequest) -> RepositoryResult<()> {
        self.submitted.lock().unwrap().push(request.clone());
        match *self.mode.lock().unwrap() {
            WriterMode::Accept => Ok(()),
            WriterMode::Unavailable => {
                Err(RepositoryError::Unavailable("connection reset".to_string()))
            }
            WriterMode::Reject => Err(RepositoryError::Rejected {
                reason: "station locked".to_string(),
            }),
        }
    }
}

// ==========================================
// 静态技能需求
// ==========================================

#[derive(Default)]
pub struct StaticSkillLookup {
    requirements: Vec<SkillRequirement>,
    failing: bool,
}

impl StaticSkillLookup {
    pub fn new(requirements: Vec<SkillRequirement>) -> Self {
        Self {
            requirements,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            requirements: Vec::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl SkillRequirementLookup for StaticSkillLookup {
    async fn requirements_for(
        &self,
        scope: &RequirementScope,
    ) -> RepositoryResult<Vec<SkillRequirement>> {
        if self.failing {
            return Err(RepositoryError::Timeout("skills lookup".to_string()));
        }
        Ok(self
            .requirements
            .iter()
            .filter(|r| match scope {
                RequirementScope::Station(station) => r.station_id == *station,
                RequirementScope::Line(line) => r.line.as_deref().map_or(true, |own| own == line),
            })
            .cloned()
            .collect())
    }
}
