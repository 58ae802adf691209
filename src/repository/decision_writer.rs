// ==========================================
// 人力就绪度引擎 - 决策写入 Trait
// ==========================================
// 职责: 定义决策写入接口 (不包含实现)
// 约束: 原子写入, 无部分成功; 失败不自动重试
// ==========================================

use crate::domain::decision::DecisionWriteRequest;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

#[async_trait]
pub trait DecisionWriter: Send + Sync {
    /// 提交决策
    ///
    /// # 返回
    /// - Ok(()): 远端已接受
    /// - Err: 网络/鉴权/校验失败, 调用方负责回滚
    async fn submit(&self, request: &DecisionWriteRequest) -> RepositoryResult<()>;
}
