// ==========================================
// 人力就绪度引擎 - 就绪度 API
// ==========================================
// 职责: 供展示层调用的门面
//       1. 刷新问题源 → 活动列表 → 聚合结论
//       2. 决策: 同步乐观应用 + 异步写入 + 回滚/提交
//       3. 撤销与倒计时
//       4. 情景对比 (先取参考数据, 再调用纯计算)
// 架构: API 层 → Engine 层 (纯计算/状态机) + Repository 层 (协作方接口)
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::decision::UndoWindow;
use crate::domain::issue::Issue;
use crate::domain::scenario::{ScenarioInput, ScenarioResult};
use crate::domain::skill::SkillRequirement;
use crate::domain::types::DecisionAction;
use crate::engine::{
    AppliedDecision, Clock, DecisionEventPublisher, DecisionLifecycle, FragilityAggregator,
    NoOpEventPublisher, ReadinessSummary, ScenarioComparator, WriteResolution,
};
use crate::repository::{
    DecisionWriter, IssueFeed, IssueQuery, RequirementScope, SkillRequirementLookup,
};

// ==========================================
// 协作方集合
// ==========================================

/// 外部协作方集合, 简化依赖注入
#[derive(Clone)]
pub struct ReadinessCollaborators {
    pub issue_feed: Arc<dyn IssueFeed>,
    pub decision_writer: Arc<dyn DecisionWriter>,
    pub skill_lookup: Arc<dyn SkillRequirementLookup>,
}

/// 展示层视图
#[derive(Debug, Clone)]
pub struct ReadinessView {
    pub issues: Arc<Vec<Issue>>,
    pub summary: ReadinessSummary,
    pub undo_window: Option<UndoWindow>,
}

// ==========================================
// ReadinessApi
// ==========================================
pub struct ReadinessApi {
    collaborators: ReadinessCollaborators,
    aggregator: FragilityAggregator,
    comparator: ScenarioComparator,
    lifecycle: Mutex<DecisionLifecycle>,
    poll_interval: std::time::Duration,
}

impl ReadinessApi {
    pub fn new(
        config: &EngineConfig,
        clock: Arc<dyn Clock>,
        collaborators: ReadinessCollaborators,
    ) -> ApiResult<Self> {
        Self::with_publisher(config, clock, collaborators, Arc::new(NoOpEventPublisher))
    }

    /// 创建 API 实例
    ///
    /// # 返回
    /// - Err(ApiError::Config): 标定不满足引擎不变量 (例如轮询间隔为 0)
    pub fn with_publisher(
        config: &EngineConfig,
        clock: Arc<dyn Clock>,
        collaborators: ReadinessCollaborators,
        publisher: Arc<dyn DecisionEventPublisher>,
    ) -> ApiResult<Self> {
        config.validate()?;

        let lifecycle =
            DecisionLifecycle::new(clock, config.undo_window_secs).with_publisher(publisher);
        Ok(Self {
            collaborators,
            aggregator: FragilityAggregator::from_config(config),
            comparator: ScenarioComparator::from_config(config),
            lifecycle: Mutex::new(lifecycle),
            poll_interval: std::time::Duration::from_millis(config.undo_poll_interval_ms),
        })
    }

    fn lifecycle(&self) -> ApiResult<MutexGuard<'_, DecisionLifecycle>> {
        self.lifecycle
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    // ==========================================
    // 读取
    // ==========================================

    /// 从问题源刷新活动列表
    ///
    /// 待写入的问题不会因刷新而重新出现
    pub async fn refresh(&self, query: &IssueQuery) -> ApiResult<ReadinessView> {
        let fetched = self.collaborators.issue_feed.fetch_issues(query).await?;
        tracing::info!(
            "问题源刷新: date={}, shift={:?}, line={:?}, fetched={}",
            query.date,
            query.shift_code,
            query.line,
            fetched.len()
        );

        let mut lifecycle = self.lifecycle()?;
        let issues = lifecycle.load_feed(fetched);
        let undo_window = lifecycle.undo_window().cloned();
        drop(lifecycle);

        Ok(self.view(issues, undo_window))
    }

    /// 当前视图 (不访问问题源)
    pub fn current(&self) -> ApiResult<ReadinessView> {
        let lifecycle = self.lifecycle()?;
        let issues = lifecycle.issues();
        let undo_window = lifecycle.undo_window().cloned();
        drop(lifecycle);
        Ok(self.view(issues, undo_window))
    }

    /// 纯聚合
    pub fn aggregate(&self, issues: &[Issue]) -> ReadinessSummary {
        self.aggregator.aggregate(issues)
    }

    fn view(&self, issues: Arc<Vec<Issue>>, undo_window: Option<UndoWindow>) -> ReadinessView {
        let summary = self.aggregator.aggregate(&issues);
        ReadinessView {
            issues,
            summary,
            undo_window,
        }
    }

    // ==========================================
    // 决策
    // ==========================================

    /// 同步乐观应用 (立即移除 + 打开撤销窗口)
    pub fn apply_decision(
        &self,
        issue_id: &str,
        action: DecisionAction,
    ) -> ApiResult<AppliedDecision> {
        if issue_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("issue_id 不能为空".to_string()));
        }
        Ok(self.lifecycle()?.apply_decision(issue_id, action)?)
    }

    /// 异步写入远端并按结果提交/回滚
    ///
    /// 写入失败不是 Err: 返回 RolledBack 及用户可读消息, 不自动重试
    pub async fn submit_decision(&self, applied: &AppliedDecision) -> ApiResult<WriteResolution> {
        let result = self
            .collaborators
            .decision_writer
            .submit(&applied.request)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "决策写入失败: decision_id={}, issue_id={}, error={}",
                    applied.request.decision_id,
                    applied.request.issue_id,
                    e
                );
                e.user_message()
            });

        Ok(self
            .lifecycle()?
            .resolve_write(applied.request.decision_id, result))
    }

    /// 应用并等待写入结果
    pub async fn decide(&self, issue_id: &str, action: DecisionAction) -> ApiResult<WriteResolution> {
        let applied = self.apply_decision(issue_id, action)?;
        self.submit_decision(&applied).await
    }

    /// 撤销最近一次决策 (窗口过期时无效果)
    pub fn undo(&self) -> ApiResult<Arc<Vec<Issue>>> {
        Ok(self.lifecycle()?.undo())
    }

    pub fn undo_remaining(&self) -> ApiResult<Option<u64>> {
        Ok(self.lifecycle()?.undo_remaining())
    }

    /// 启动撤销倒计时轮询
    ///
    /// 按配置间隔 (默认 1s) 检查到期并推送剩余秒数; 所有接收端关闭后退出
    pub fn spawn_undo_ticker(self: &Arc<Self>) -> (JoinHandle<()>, watch::Receiver<Option<u64>>) {
        let (tx, rx) = watch::channel(None);
        let api = Arc::clone(self);
        let period = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let remaining = match api.lifecycle() {
                    Ok(mut lifecycle) => {
                        lifecycle.expire_due();
                        lifecycle.undo_remaining()
                    }
                    Err(e) => {
                        tracing::error!("撤销倒计时退出: {}", e);
                        break;
                    }
                };
                if tx.send(remaining).is_err() {
                    tracing::debug!("撤销倒计时无订阅者, 退出");
                    break;
                }
            }
        });

        (handle, rx)
    }

    // ==========================================
    // 情景对比
    // ==========================================

    /// 以当前活动列表为基线进行情景对比
    pub async fn compare_scenario(&self, scenario: &ScenarioInput) -> ApiResult<ScenarioResult> {
        let requirements = self.load_requirements(scenario).await;
        let baseline = self.lifecycle()?.issues();
        Ok(self
            .comparator
            .compare(scenario, &baseline, requirements.as_deref()))
    }

    /// 批量情景对比, 参考数据并发获取
    pub async fn compare_scenarios(
        &self,
        scenarios: &[ScenarioInput],
    ) -> ApiResult<Vec<ScenarioResult>> {
        let requirements = join_all(scenarios.iter().map(|s| self.load_requirements(s))).await;
        let baseline = self.lifecycle()?.issues();

        Ok(scenarios
            .iter()
            .zip(requirements)
            .map(|(scenario, reqs)| self.comparator.compare(scenario, &baseline, reqs.as_deref()))
            .collect())
    }

    /// 获取技能需求; 失败或为空时返回 None (降级为通用提示)
    async fn load_requirements(&self, scenario: &ScenarioInput) -> Option<Vec<SkillRequirement>> {
        let scope = RequirementScope::for_scenario(scenario);
        match self.collaborators.skill_lookup.requirements_for(&scope).await {
            Ok(reqs) if !reqs.is_empty() => Some(reqs),
            Ok(_) => {
                tracing::debug!("技能需求为空: scope={:?}", scope);
                None
            }
            Err(e) => {
                tracing::warn!("技能需求查询失败, 降级为通用提示: scope={:?}, error={}", scope, e);
                None
            }
        }
    }
}
