// ==========================================
// 人力就绪度引擎 - 决策生命周期管理器
// ==========================================
// 职责: 活动问题列表的唯一写入方
//       乐观移除 → 待写入 → {已提交, 已回滚}, 外加 30 秒撤销窗口
// 红线: 每次状态转换都生成新的列表值 (Arc), 不原地修改
// 红线: 同一时刻最多一个撤销窗口, 新决策直接覆盖旧窗口 (最新者优先)
// 红线: 远端应答按 decision_id 处理, 与当前展示/筛选无关
// ==========================================

use crate::domain::decision::{DecisionState, DecisionWriteRequest, UndoWindow};
use crate::domain::issue::Issue;
use crate::domain::types::DecisionAction;
use crate::engine::clock::Clock;
use crate::engine::events::{
    publish_quietly, DecisionEvent, DecisionEventPublisher, DecisionEventType, NoOpEventPublisher,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// 生命周期错误 (调用方误用, 非远端失败)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("问题不在活动列表中: issue_id={issue_id}")]
    IssueNotActive { issue_id: String },
}

/// 乐观应用后的结果
#[derive(Debug, Clone)]
pub struct AppliedDecision {
    pub issues: Arc<Vec<Issue>>,
    pub undo_window: UndoWindow,
    pub request: DecisionWriteRequest,
}

/// 远端应答处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Committed,
    RolledBack { message: String },
    /// 已撤销或未知决策的应答
    Ignored,
}

#[derive(Debug, Clone)]
pub struct WriteResolution {
    pub decision_id: Uuid,
    pub outcome: WriteOutcome,
    pub issues: Arc<Vec<Issue>>,
}

#[derive(Debug, Clone)]
struct PendingDecision {
    issue: Issue,
    action: DecisionAction,
    // 撤销窗口到期时间, 已撤销决策的保留期限
    expires_at: DateTime<Utc>,
}

// ==========================================
// DecisionLifecycle
// ==========================================
pub struct DecisionLifecycle {
    clock: Arc<dyn Clock>,
    publisher: Arc<dyn DecisionEventPublisher>,
    undo_window: Duration,

    // 活动列表, 始终按 issue_id 排序
    active: Arc<Vec<Issue>>,
    // 待写入决策 (decision_id → 决策)
    pending: HashMap<Uuid, PendingDecision>,
    // 当前撤销窗口
    undo: Option<UndoWindow>,
    // 已提交但问题源尚未同步的问题
    committed_issue_ids: HashSet<String>,
    // 已撤销的决策, 其迟到应答需忽略 (保留至原撤销窗口到期)
    undone: HashMap<Uuid, PendingDecision>,
    // 仅跟踪未终结的决策: 待写入 / 撤销窗口内已提交 / 已撤销待应答
    states: HashMap<Uuid, DecisionState>,
}

impl DecisionLifecycle {
    pub fn new(clock: Arc<dyn Clock>, undo_window_secs: i64) -> Self {
        Self {
            clock,
            publisher: Arc::new(NoOpEventPublisher),
            undo_window: Duration::seconds(undo_window_secs),
            active: Arc::new(Vec::new()),
            pending: HashMap::new(),
            undo: None,
            committed_issue_ids: HashSet::new(),
            undone: HashMap::new(),
            states: HashMap::new(),
        }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn DecisionEventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    // ==========================================
    // 读取
    // ==========================================

    /// 当前活动列表 (共享快照)
    pub fn issues(&self) -> Arc<Vec<Issue>> {
        Arc::clone(&self.active)
    }

    /// 未过期的撤销窗口
    pub fn undo_window(&self) -> Option<&UndoWindow> {
        let now = self.clock.now();
        self.undo.as_ref().filter(|w| w.is_live(now))
    }

    /// 撤销剩余秒数 (仅用于展示)
    pub fn undo_remaining(&self) -> Option<u64> {
        let now = self.clock.now();
        self.undo
            .as_ref()
            .filter(|w| w.is_live(now))
            .map(|w| w.remaining_secs(now))
    }

    /// 未终结决策的状态; 回滚、窗口到期、应答已处理的决策返回 None
    pub fn state_of(&self, decision_id: Uuid) -> Option<DecisionState> {
        self.states.get(&decision_id).copied()
    }

    pub fn has_pending_writes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_pending(&self, decision_id: Uuid) -> bool {
        self.pending.contains_key(&decision_id)
    }

    // ==========================================
    // 状态转换
    // ==========================================

    /// 以问题源最新结果替换活动列表
    ///
    /// 待写入、撤销窗口内、已提交未同步的问题不会被问题源"复活"
    pub fn load_feed(&mut self, feed: Vec<Issue>) -> Arc<Vec<Issue>> {
        // 问题源已不再返回的已提交问题, 说明远端已同步
        let open_in_feed: HashSet<&str> = feed
            .iter()
            .filter(|i| i.is_open())
            .map(|i| i.issue_id.as_str())
            .collect();
        self.committed_issue_ids
            .retain(|id| open_in_feed.contains(id.as_str()));

        let suppressed = self.suppressed_issue_ids();
        let mut next: Vec<Issue> = feed
            .into_iter()
            .filter(|i| !suppressed.contains(&i.issue_id))
            .collect();
        next.sort_by(|a, b| a.issue_id.cmp(&b.issue_id));

        tracing::debug!(
            "问题源刷新: active={}, suppressed={}",
            next.len(),
            suppressed.len()
        );
        self.active = Arc::new(next);
        self.issues()
    }

    /// 应用决策: Open → PendingWrite
    ///
    /// 问题立即从活动列表移除, 新撤销窗口覆盖旧窗口
    pub fn apply_decision(
        &mut self,
        issue_id: &str,
        action: DecisionAction,
    ) -> Result<AppliedDecision, LifecycleError> {
        let issue = self
            .active
            .iter()
            .find(|i| i.issue_id == issue_id)
            .cloned()
            .ok_or_else(|| LifecycleError::IssueNotActive {
                issue_id: issue_id.to_string(),
            })?;

        let now = self.clock.now();
        let decision_id = Uuid::new_v4();
        self.prune_undone(now);

        if let Some(previous) = self.undo.take() {
            tracing::info!(
                "撤销窗口被新决策覆盖: previous_issue={}, new_issue={}",
                previous.resolved_issue.issue_id,
                issue_id
            );
            publish_quietly(
                &self.publisher,
                DecisionEvent::new(
                    previous.decision_id,
                    &previous.resolved_issue.issue_id,
                    previous.action,
                    DecisionEventType::Superseded,
                    now,
                ),
            );
            self.forget_if_committed(previous.decision_id);
        }

        let next: Vec<Issue> = self
            .active
            .iter()
            .filter(|i| i.issue_id != issue_id)
            .cloned()
            .collect();
        self.active = Arc::new(next);

        let window = UndoWindow {
            decision_id,
            action,
            resolved_issue: issue.clone(),
            expires_at: now + self.undo_window,
        };
        self.undo = Some(window.clone());
        self.pending.insert(
            decision_id,
            PendingDecision {
                issue: issue.clone(),
                action,
                expires_at: window.expires_at,
            },
        );
        self.states.insert(decision_id, DecisionState::PendingWrite);

        tracing::info!(
            "决策已乐观应用: decision_id={}, issue_id={}, action={}",
            decision_id,
            issue_id,
            action
        );
        publish_quietly(
            &self.publisher,
            DecisionEvent::new(decision_id, issue_id, action, DecisionEventType::Applied, now),
        );

        Ok(AppliedDecision {
            issues: self.issues(),
            undo_window: window,
            request: DecisionWriteRequest::for_issue(decision_id, &issue, action),
        })
    }

    /// 处理远端应答: PendingWrite → Committed / RolledBack
    ///
    /// # 说明
    /// - 成功: 乐观移除保持不变
    /// - 失败: 问题按 issue_id 重新插入, 丢弃该决策的撤销窗口
    /// - 已撤销的决策: 应答被忽略 (撤销以客户端为准)
    pub fn resolve_write(&mut self, decision_id: Uuid, result: Result<(), String>) -> WriteResolution {
        let now = self.clock.now();

        let Some(pending) = self.pending.remove(&decision_id) else {
            match self.undone.remove(&decision_id) {
                Some(undone) => {
                    self.states.remove(&decision_id);
                    tracing::info!(
                        "撤销后到达的远端应答已忽略: decision_id={}, issue_id={}",
                        decision_id,
                        undone.issue.issue_id
                    );
                    publish_quietly(
                        &self.publisher,
                        DecisionEvent::new(
                            decision_id,
                            &undone.issue.issue_id,
                            undone.action,
                            DecisionEventType::LateAckIgnored,
                            now,
                        )
                        .with_detail(if result.is_ok() { "success" } else { "failure" }),
                    );
                }
                None => {
                    tracing::warn!("未知决策的远端应答已忽略: decision_id={}", decision_id);
                }
            }
            return self.resolution(decision_id, WriteOutcome::Ignored);
        };

        let issue_id = pending.issue.issue_id.clone();
        match result {
            Ok(()) => {
                // 撤销窗口已被覆盖或到期时, 提交即终结
                if self.owns_undo_window(decision_id) {
                    self.states.insert(decision_id, DecisionState::Committed);
                } else {
                    self.states.remove(&decision_id);
                }
                self.committed_issue_ids.insert(issue_id.clone());
                tracing::info!("决策已提交: decision_id={}, issue_id={}", decision_id, issue_id);
                publish_quietly(
                    &self.publisher,
                    DecisionEvent::new(
                        decision_id,
                        &issue_id,
                        pending.action,
                        DecisionEventType::Committed,
                        now,
                    ),
                );
                self.resolution(decision_id, WriteOutcome::Committed)
            }
            Err(message) => {
                self.reinsert(pending.issue);
                if self.owns_undo_window(decision_id) {
                    self.undo = None;
                }
                self.states.remove(&decision_id);
                tracing::warn!(
                    "决策写入失败, 已回滚: decision_id={}, issue_id={}, reason={}",
                    decision_id,
                    issue_id,
                    message
                );
                publish_quietly(
                    &self.publisher,
                    DecisionEvent::new(
                        decision_id,
                        &issue_id,
                        pending.action,
                        DecisionEventType::RolledBack,
                        now,
                    )
                    .with_detail(message.clone()),
                );
                self.resolution(decision_id, WriteOutcome::RolledBack { message })
            }
        }
    }

    /// 撤销最近一次决策 (仅客户端, 不联系远端)
    ///
    /// 窗口不存在或已过期时无效果, 返回原列表
    pub fn undo(&mut self) -> Arc<Vec<Issue>> {
        let now = self.clock.now();
        let Some(window) = self.undo.take() else {
            return self.issues();
        };

        if !window.is_live(now) {
            self.finalize_expired(window);
            return self.issues();
        }

        let decision_id = window.decision_id;
        let issue_id = window.resolved_issue.issue_id.clone();
        self.committed_issue_ids.remove(&issue_id);
        if self.pending.remove(&decision_id).is_some() {
            // 写入仍在途, 记住该决策以忽略迟到应答
            self.undone.insert(
                decision_id,
                PendingDecision {
                    issue: window.resolved_issue.clone(),
                    action: window.action,
                    expires_at: window.expires_at,
                },
            );
            self.states.insert(decision_id, DecisionState::Open);
        } else {
            self.states.remove(&decision_id);
        }
        self.reinsert(window.resolved_issue);

        tracing::info!("决策已撤销: decision_id={}, issue_id={}", decision_id, issue_id);
        publish_quietly(
            &self.publisher,
            DecisionEvent::new(decision_id, &issue_id, window.action, DecisionEventType::Undone, now),
        );
        self.issues()
    }

    /// 清除已到期的撤销窗口, 返回被清除的窗口
    pub fn expire_due(&mut self) -> Option<UndoWindow> {
        let now = self.clock.now();
        self.prune_undone(now);
        if self.undo.as_ref().is_some_and(|w| !w.is_live(now)) {
            let window = self.undo.take()?;
            self.finalize_expired(window.clone());
            return Some(window);
        }
        None
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn finalize_expired(&mut self, window: UndoWindow) {
        self.forget_if_committed(window.decision_id);
        tracing::info!(
            "撤销窗口到期, 决策最终生效: decision_id={}, issue_id={}",
            window.decision_id,
            window.resolved_issue.issue_id
        );
        publish_quietly(
            &self.publisher,
            DecisionEvent::new(
                window.decision_id,
                &window.resolved_issue.issue_id,
                window.action,
                DecisionEventType::Expired,
                self.clock.now(),
            ),
        );
    }

    fn owns_undo_window(&self, decision_id: Uuid) -> bool {
        self.undo
            .as_ref()
            .is_some_and(|w| w.decision_id == decision_id)
    }

    /// 已提交且失去撤销窗口的决策不再跟踪; 待写入的保留到应答
    fn forget_if_committed(&mut self, decision_id: Uuid) {
        if self.states.get(&decision_id) == Some(&DecisionState::Committed) {
            self.states.remove(&decision_id);
        }
    }

    /// 丢弃原撤销窗口已到期的已撤销决策, 之后的迟到应答按未知决策忽略
    fn prune_undone(&mut self, now: DateTime<Utc>) {
        let stale: Vec<Uuid> = self
            .undone
            .iter()
            .filter(|(_, d)| d.expires_at <= now)
            .map(|(id, _)| *id)
            .collect();
        for decision_id in stale {
            self.undone.remove(&decision_id);
            self.states.remove(&decision_id);
        }
    }

    fn suppressed_issue_ids(&self) -> HashSet<String> {
        let mut ids: HashSet<String> = self
            .pending
            .values()
            .map(|p| p.issue.issue_id.clone())
            .collect();
        if let Some(window) = &self.undo {
            ids.insert(window.resolved_issue.issue_id.clone());
        }
        ids.extend(self.committed_issue_ids.iter().cloned());
        ids
    }

    /// 按 issue_id 有序插入, 已存在时不重复
    fn reinsert(&mut self, issue: Issue) {
        let mut next: Vec<Issue> = self.active.as_ref().clone();
        if let Err(pos) = next.binary_search_by(|i| i.issue_id.cmp(&issue.issue_id)) {
            next.insert(pos, issue);
        }
        self.active = Arc::new(next);
    }

    fn resolution(&self, decision_id: Uuid, outcome: WriteOutcome) -> WriteResolution {
        WriteResolution {
            decision_id,
            outcome,
            issues: self.issues(),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{IssueType, Severity};
    use crate::engine::clock::ManualClock;
    use crate::engine::events::RecordingEventPublisher;
    use chrono::{NaiveDate, Utc};

    fn issue(id: &str) -> Issue {
        Issue {
            issue_id: id.to_string(),
            severity: Severity::Warning,
            issue_type: IssueType::NoGo,
            station_id: Some(format!("ST-{}", id)),
            station_name: None,
            line: None,
            shift_code: "A".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            root_cause: None,
            resolved: false,
        }
    }

    fn setup() -> (Arc<ManualClock>, Arc<RecordingEventPublisher>, DecisionLifecycle) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let publisher = Arc::new(RecordingEventPublisher::new());
        let mut lifecycle =
            DecisionLifecycle::new(clock.clone(), 30).with_publisher(publisher.clone());
        lifecycle.load_feed(vec![issue("I-3"), issue("I-1"), issue("I-2")]);
        (clock, publisher, lifecycle)
    }

    fn ids(list: &[Issue]) -> Vec<&str> {
        list.iter().map(|i| i.issue_id.as_str()).collect()
    }

    #[test]
    fn test_load_feed_sorts_by_issue_id() {
        let (_, _, lifecycle) = setup();
        assert_eq!(ids(&lifecycle.issues()), vec!["I-1", "I-2", "I-3"]);
    }

    #[test]
    fn test_apply_unknown_issue_fails() {
        let (_, _, mut lifecycle) = setup();
        let err = lifecycle
            .apply_decision("I-404", DecisionAction::Swap)
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::IssueNotActive {
                issue_id: "I-404".to_string()
            }
        );
    }

    #[test]
    fn test_transitions_return_new_list_values() {
        let (_, _, mut lifecycle) = setup();
        let before = lifecycle.issues();
        let applied = lifecycle
            .apply_decision("I-2", DecisionAction::Acknowledged)
            .unwrap();
        assert!(!Arc::ptr_eq(&before, &applied.issues));
        assert_eq!(ids(&before), vec!["I-1", "I-2", "I-3"]);
        assert_eq!(ids(&applied.issues), vec!["I-1", "I-3"]);
    }

    #[test]
    fn test_undo_without_window_returns_same_list() {
        let (_, _, mut lifecycle) = setup();
        let before = lifecycle.issues();
        let after = lifecycle.undo();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_failure_rolls_back_and_clears_window() {
        let (_, publisher, mut lifecycle) = setup();
        let applied = lifecycle.apply_decision("I-1", DecisionAction::Escalate).unwrap();
        let resolution =
            lifecycle.resolve_write(applied.request.decision_id, Err("forbidden".to_string()));

        assert_eq!(
            resolution.outcome,
            WriteOutcome::RolledBack {
                message: "forbidden".to_string()
            }
        );
        assert_eq!(ids(&resolution.issues), vec!["I-1", "I-2", "I-3"]);
        assert!(lifecycle.undo_window().is_none());
        assert_eq!(lifecycle.state_of(applied.request.decision_id), None);
        assert_eq!(
            publisher.event_types(),
            vec![DecisionEventType::Applied, DecisionEventType::RolledBack]
        );
    }

    #[test]
    fn test_failure_of_older_decision_keeps_newer_window() {
        let (_, _, mut lifecycle) = setup();
        let first = lifecycle.apply_decision("I-1", DecisionAction::Swap).unwrap();
        let second = lifecycle.apply_decision("I-2", DecisionAction::Swap).unwrap();

        lifecycle.resolve_write(first.request.decision_id, Err("timeout".to_string()));

        let window = lifecycle.undo_window().unwrap();
        assert_eq!(window.decision_id, second.request.decision_id);
        assert_eq!(ids(&lifecycle.issues()), vec!["I-1", "I-3"]);
    }

    #[test]
    fn test_undo_during_pending_write_ignores_late_ack() {
        let (_, publisher, mut lifecycle) = setup();
        let applied = lifecycle.apply_decision("I-3", DecisionAction::PlanTraining).unwrap();
        lifecycle.undo();

        let resolution = lifecycle.resolve_write(applied.request.decision_id, Ok(()));
        assert_eq!(resolution.outcome, WriteOutcome::Ignored);
        assert_eq!(ids(&resolution.issues), vec!["I-1", "I-2", "I-3"]);
        assert_eq!(lifecycle.state_of(applied.request.decision_id), None);
        assert!(lifecycle.undone.is_empty());
        assert!(publisher
            .event_types()
            .contains(&DecisionEventType::LateAckIgnored));
    }

    #[test]
    fn test_expire_due_finalizes_window() {
        let (clock, publisher, mut lifecycle) = setup();
        lifecycle.apply_decision("I-1", DecisionAction::Acknowledged).unwrap();
        assert_eq!(lifecycle.undo_remaining(), Some(30));

        clock.advance(Duration::seconds(12));
        assert_eq!(lifecycle.undo_remaining(), Some(18));
        assert!(lifecycle.expire_due().is_none());

        clock.advance(Duration::seconds(18));
        assert!(lifecycle.undo_window().is_none());
        assert!(lifecycle.expire_due().is_some());
        assert!(lifecycle.expire_due().is_none());
        assert_eq!(
            publisher.event_types().last(),
            Some(&DecisionEventType::Expired)
        );
    }

    #[test]
    fn test_refresh_does_not_resurrect_pending_issue() {
        let (_, _, mut lifecycle) = setup();
        let applied = lifecycle.apply_decision("I-2", DecisionAction::Swap).unwrap();

        let refreshed = lifecycle.load_feed(vec![issue("I-1"), issue("I-2"), issue("I-3")]);
        assert_eq!(ids(&refreshed), vec!["I-1", "I-3"]);

        lifecycle.resolve_write(applied.request.decision_id, Ok(()));
        let refreshed = lifecycle.load_feed(vec![issue("I-1"), issue("I-2"), issue("I-3")]);
        assert_eq!(ids(&refreshed), vec!["I-1", "I-3"]);

        // 远端同步后问题源不再返回该问题
        let refreshed = lifecycle.load_feed(vec![issue("I-1"), issue("I-3")]);
        assert_eq!(ids(&refreshed), vec!["I-1", "I-3"]);
        assert!(lifecycle.committed_issue_ids.is_empty());
    }

    #[test]
    fn test_tracking_is_released_after_full_cycle() {
        let (clock, _, mut lifecycle) = setup();

        // 应用 → 提交 → 到期
        let committed = lifecycle.apply_decision("I-1", DecisionAction::Acknowledged).unwrap();
        lifecycle.resolve_write(committed.request.decision_id, Ok(()));
        assert_eq!(
            lifecycle.state_of(committed.request.decision_id),
            Some(DecisionState::Committed)
        );
        clock.advance(Duration::seconds(31));
        lifecycle.expire_due();

        // 应用 → 回滚
        let failed = lifecycle.apply_decision("I-2", DecisionAction::Swap).unwrap();
        lifecycle.resolve_write(failed.request.decision_id, Err("offline".to_string()));

        // 应用 → 撤销, 应答始终未到达
        lifecycle.apply_decision("I-3", DecisionAction::Escalate).unwrap();
        lifecycle.undo();
        assert_eq!(lifecycle.undone.len(), 1);
        clock.advance(Duration::seconds(31));
        lifecycle.expire_due();

        assert!(lifecycle.states.is_empty());
        assert!(lifecycle.undone.is_empty());
        assert!(lifecycle.pending.is_empty());
        assert!(lifecycle.undo.is_none());
    }

    #[test]
    fn test_superseded_commit_is_released() {
        let (_, _, mut lifecycle) = setup();
        let first = lifecycle.apply_decision("I-1", DecisionAction::Acknowledged).unwrap();
        lifecycle.resolve_write(first.request.decision_id, Ok(()));

        let second = lifecycle.apply_decision("I-2", DecisionAction::Acknowledged).unwrap();
        assert_eq!(lifecycle.state_of(first.request.decision_id), None);

        lifecycle.resolve_write(second.request.decision_id, Ok(()));
        lifecycle.undo();
        assert!(lifecycle.states.is_empty());
        assert!(lifecycle.undone.is_empty());
    }
}
