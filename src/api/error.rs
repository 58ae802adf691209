// ==========================================
// 人力就绪度引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 把协作方/状态机错误转换为用户可读消息
// 说明: 决策写入失败不在此列, 它以回滚结果 (WriteOutcome::RolledBack) 返回
// ==========================================

use crate::config::ConfigError;
use crate::engine::LifecycleError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("问题不在活动列表中: {0}")]
    IssueNotActive(String),

    // ==========================================
    // 协作方错误
    // ==========================================
    #[error("问题源不可用: {0}")]
    FeedUnavailable(#[source] RepositoryError),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::IssueNotActive { issue_id } => ApiError::IssueNotActive(issue_id),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::FeedUnavailable(err)
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
