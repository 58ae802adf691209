// ==========================================
// 人力就绪度引擎 - 决策事件发布
// ==========================================
// 职责: 定义决策生命周期事件发布 trait, 实现依赖倒置
// 说明: 引擎只发布事件, 审计/通知由外部实现订阅
// ==========================================

use crate::domain::types::DecisionAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// 决策事件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionEventType {
    /// 乐观移除, 进入待写入
    Applied,
    /// 远端确认成功
    Committed,
    /// 远端失败, 已回滚
    RolledBack,
    /// 用户撤销
    Undone,
    /// 撤销窗口到期, 决策最终生效
    Expired,
    /// 被新决策覆盖的撤销窗口
    Superseded,
    /// 撤销之后才到达的远端应答, 已忽略
    LateAckIgnored,
}

impl DecisionEventType {
    pub fn as_str(&self) -> &str {
        match self {
            DecisionEventType::Applied => "Applied",
            DecisionEventType::Committed => "Committed",
            DecisionEventType::RolledBack => "RolledBack",
            DecisionEventType::Undone => "Undone",
            DecisionEventType::Expired => "Expired",
            DecisionEventType::Superseded => "Superseded",
            DecisionEventType::LateAckIgnored => "LateAckIgnored",
        }
    }
}

/// 决策事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEvent {
    pub decision_id: Uuid,
    pub issue_id: String,
    pub action: DecisionAction,
    pub event_type: DecisionEventType,
    pub occurred_at: DateTime<Utc>,
    /// 失败原因等附加说明
    pub detail: Option<String>,
}

impl DecisionEvent {
    pub fn new(
        decision_id: Uuid,
        issue_id: &str,
        action: DecisionAction,
        event_type: DecisionEventType,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            decision_id,
            issue_id: issue_id.to_string(),
            action,
            event_type,
            occurred_at,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 决策事件发布者
///
/// 发布失败只记录日志, 不影响状态机
pub trait DecisionEventPublisher: Send + Sync {
    fn publish(&self, event: DecisionEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl DecisionEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: DecisionEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - issue_id={}, event_type={}",
            event.issue_id,
            event.event_type.as_str()
        );
        Ok(())
    }
}

/// 内存记录发布者 (审计回放/测试)
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<DecisionEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DecisionEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn event_types(&self) -> Vec<DecisionEventType> {
        self.events().iter().map(|e| e.event_type).collect()
    }
}

impl DecisionEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: DecisionEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut guard = self
            .events
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        guard.push(event);
        Ok(())
    }
}

/// 发布并吞掉错误
pub(crate) fn publish_quietly(publisher: &Arc<dyn DecisionEventPublisher>, event: DecisionEvent) {
    let event_type = event.event_type;
    if let Err(e) = publisher.publish(event) {
        tracing::warn!("决策事件发布失败: event_type={}, {}", event_type.as_str(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: DecisionEventType) -> DecisionEvent {
        DecisionEvent::new(
            Uuid::new_v4(),
            "I-1",
            DecisionAction::Escalate,
            event_type,
            Utc::now(),
        )
    }

    #[test]
    fn test_noop_publisher() {
        let publisher = NoOpEventPublisher;
        assert!(publisher.publish(event(DecisionEventType::Applied)).is_ok());
    }

    #[test]
    fn test_recording_publisher_keeps_order() {
        let publisher = RecordingEventPublisher::new();
        publisher.publish(event(DecisionEventType::Applied)).unwrap();
        publisher
            .publish(event(DecisionEventType::RolledBack).with_detail("403"))
            .unwrap();

        assert_eq!(
            publisher.event_types(),
            vec![DecisionEventType::Applied, DecisionEventType::RolledBack]
        );
        assert_eq!(publisher.events()[1].detail.as_deref(), Some("403"));
    }

    #[test]
    fn test_publish_quietly_swallows_errors() {
        struct Failing;
        impl DecisionEventPublisher for Failing {
            fn publish(&self, _event: DecisionEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
                Err("down".into())
            }
        }
        let publisher: Arc<dyn DecisionEventPublisher> = Arc::new(Failing);
        publish_quietly(&publisher, event(DecisionEventType::Expired));
    }
}
