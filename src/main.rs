// Report utility: aggregate a JSON issue snapshot and compare scenarios against it.
//
// Usage:
//   cargo run --bin readiness-report -- <snapshot.json> [--config engine.json]
//
// The snapshot file carries the issues, optional skill requirements and the scenarios
// to compare. The report is printed to stdout as JSON; logs go to stderr.

use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use workforce_readiness::config::ConfigManager;
use workforce_readiness::engine::SystemClock;
use workforce_readiness::repository::{
    DecisionWriter, IssueFeed, IssueQuery, RepositoryError, RepositoryResult, RequirementScope,
    SkillRequirementLookup,
};
use workforce_readiness::{
    logging, DecisionWriteRequest, Issue, ReadinessApi, ReadinessCollaborators, ReadinessSummary,
    ScenarioInput, ScenarioResult, SkillRequirement,
};

#[derive(Debug, Deserialize)]
struct Snapshot {
    date: NaiveDate,
    #[serde(default)]
    shift_code: Option<String>,
    #[serde(default)]
    line: Option<String>,
    issues: Vec<Issue>,
    #[serde(default)]
    requirements: Vec<SkillRequirement>,
    #[serde(default)]
    scenarios: Vec<ScenarioInput>,
}

#[derive(Debug, Serialize)]
struct Report {
    app: &'static str,
    version: &'static str,
    generated_at: chrono::DateTime<Utc>,
    date: NaiveDate,
    active_issues: usize,
    summary: ReadinessSummary,
    scenarios: Vec<ScenarioResult>,
}

/// 快照文件充当问题源与技能需求查询
struct SnapshotSource {
    issues: Vec<Issue>,
    requirements: Vec<SkillRequirement>,
}

#[async_trait]
impl IssueFeed for SnapshotSource {
    async fn fetch_issues(&self, query: &IssueQuery) -> RepositoryResult<Vec<Issue>> {
        Ok(self
            .issues
            .iter()
            .filter(|issue| query.matches(issue))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SkillRequirementLookup for SnapshotSource {
    async fn requirements_for(
        &self,
        scope: &RequirementScope,
    ) -> RepositoryResult<Vec<SkillRequirement>> {
        Ok(self
            .requirements
            .iter()
            .filter(|req| match scope {
                RequirementScope::Station(station) => {
                    req.station_id.eq_ignore_ascii_case(station)
                        || req
                            .station_name
                            .as_deref()
                            .is_some_and(|name| name.eq_ignore_ascii_case(station))
                }
                RequirementScope::Line(line) => req
                    .line
                    .as_deref()
                    .map_or(true, |own| own.eq_ignore_ascii_case(line)),
            })
            .cloned()
            .collect())
    }
}

/// 报告工具不写入决策
struct ReadOnlyWriter;

#[async_trait]
impl DecisionWriter for ReadOnlyWriter {
    async fn submit(&self, request: &DecisionWriteRequest) -> RepositoryResult<()> {
        Err(RepositoryError::Rejected {
            reason: format!("read-only report, decision {} not written", request.decision_id),
        })
    }
}

fn parse_args() -> anyhow::Result<(PathBuf, Option<PathBuf>)> {
    let mut args = std::env::args().skip(1);
    let mut snapshot = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config requires a path"),
            },
            _ if snapshot.is_none() => snapshot = Some(PathBuf::from(arg)),
            other => bail!("unexpected argument: {}", other),
        }
    }

    match snapshot {
        Some(path) => Ok((path, config)),
        None => bail!("usage: readiness-report <snapshot.json> [--config engine.json]"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let (snapshot_path, config_path) = parse_args()?;

    let manager = match config_path {
        Some(path) => ConfigManager::load(&path),
        None => ConfigManager::load_default(),
    }
    .context("failed to load engine config")?;
    tracing::info!(
        "{} v{} - config source: {:?}",
        workforce_readiness::APP_NAME,
        workforce_readiness::VERSION,
        manager.source()
    );
    let config = manager.into_config();

    let raw = std::fs::read_to_string(&snapshot_path)
        .with_context(|| format!("failed to read {}", snapshot_path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", snapshot_path.display()))?;

    let mut query = IssueQuery::for_date(snapshot.date);
    query.shift_code = snapshot.shift_code;
    query.line = snapshot.line;

    let source = Arc::new(SnapshotSource {
        issues: snapshot.issues,
        requirements: snapshot.requirements,
    });
    let api = ReadinessApi::new(
        &config,
        Arc::new(SystemClock),
        ReadinessCollaborators {
            issue_feed: source.clone(),
            decision_writer: Arc::new(ReadOnlyWriter),
            skill_lookup: source,
        },
    )?;

    let view = api.refresh(&query).await?;
    let scenarios = api.compare_scenarios(&snapshot.scenarios).await?;

    let report = Report {
        app: workforce_readiness::APP_NAME,
        version: workforce_readiness::VERSION,
        generated_at: Utc::now(),
        date: snapshot.date,
        active_issues: view.issues.len(),
        summary: view.summary,
        scenarios,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
