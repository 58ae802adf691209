// ==========================================
// 人力就绪度引擎 - 协作方错误类型
// ==========================================
// 职责: 问题源/决策写入/技能需求查询的失败分类
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 外部协作方错误
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 传输/可用性 =====
    #[error("远端不可用: {0}")]
    Unavailable(String),

    #[error("远端请求超时: {0}")]
    Timeout(String),

    // ===== 鉴权 =====
    #[error("未授权: {0}")]
    Unauthorized(String),

    // ===== 业务拒绝 =====
    #[error("远端拒绝写入: {reason}")]
    Rejected { reason: String },

    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 面向用户的简短提示
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::Unavailable(_) | RepositoryError::Timeout(_) => {
                "网络异常, 决策未保存, 请稍后重试".to_string()
            }
            RepositoryError::Unauthorized(_) => "登录已失效或无权限, 决策未保存".to_string(),
            RepositoryError::Rejected { reason } => format!("决策被拒绝: {}", reason),
            RepositoryError::NotFound { entity, id } => {
                format!("{}(id={})不存在, 决策未保存", entity, id)
            }
            RepositoryError::Other(err) => format!("决策未保存: {}", err),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = RepositoryError::Timeout("POST /decisions 5000ms".to_string());
        assert!(!err.user_message().contains("5000ms"));

        let err = RepositoryError::Rejected {
            reason: "station closed".to_string(),
        };
        assert!(err.user_message().contains("station closed"));
    }
}
