// ==========================================
// 人力就绪度引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、校验
// 存储: JSON 文件 (缺省时使用内置默认值)
// ==========================================

use crate::config::engine_config::{ConfigError, EngineConfig};
use std::path::{Path, PathBuf};

// ==========================================
// 配置键 (环境变量)
// ==========================================
pub mod config_keys {
    /// 配置文件路径覆写
    pub const CONFIG_PATH: &str = "WORKFORCE_READINESS_CONFIG";
    /// 撤销窗口秒数覆写
    pub const UNDO_SECS: &str = "WORKFORCE_READINESS_UNDO_SECS";

    /// 默认配置目录名
    pub const APP_DIR: &str = "workforce-readiness";
    /// 默认配置文件名
    pub const FILE_NAME: &str = "engine.json";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    source: Option<PathBuf>,
    config: EngineConfig,
}

impl ConfigManager {
    /// 使用内置默认值
    pub fn defaults() -> Self {
        Self {
            source: None,
            config: EngineConfig::default(),
        }
    }

    /// 从指定 JSON 文件加载
    ///
    /// # 说明
    /// - 文件不存在: 使用默认值 (不视为错误)
    /// - 文件存在但无法解析/校验失败: 返回错误
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("配置文件不存在, 使用默认配置: {}", path.display());
            let mut manager = Self::defaults();
            manager.apply_env_overrides()?;
            return Ok(manager);
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: EngineConfig = serde_json::from_str(&raw)?;

        let mut manager = Self {
            source: Some(path.to_path_buf()),
            config,
        };
        manager.apply_env_overrides()?;
        tracing::info!("配置加载完成: {}", path.display());
        Ok(manager)
    }

    /// 按默认路径加载
    ///
    /// 优先级: WORKFORCE_READINESS_CONFIG > 系统配置目录 > 内置默认值
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(config_keys::CONFIG_PATH) {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) => Self::load(path),
            None => {
                let mut manager = Self::defaults();
                manager.apply_env_overrides()?;
                Ok(manager)
            }
        }
    }

    /// 系统配置目录下的默认路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(config_keys::APP_DIR).join(config_keys::FILE_NAME))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 应用环境变量覆写并重新校验
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var(config_keys::UNDO_SECS) {
            let secs = raw.trim().parse::<i64>().map_err(|e| {
                ConfigError::Invalid(format!("{}={} 无法解析: {}", config_keys::UNDO_SECS, raw, e))
            })?;
            tracing::debug!("撤销窗口秒数被环境变量覆写: {}", secs);
            self.config.undo_window_secs = secs;
        }
        self.config.validate()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::defaults()
    }
}
