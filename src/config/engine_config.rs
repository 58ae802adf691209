// ==========================================
// 人力就绪度引擎 - 引擎标定配置
// ==========================================
// 职责: 暴露量标定常量与策略阈值
// 说明: 所有字段都有默认值, 配置文件可只写需要覆写的部分
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: path={path}, {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置校验失败: {0}")]
    Invalid(String),
}

// ==========================================
// 单个严重度的标定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityCalibration {
    pub cost_min: f64,
    pub cost_max: f64,
    pub hours_min: f64,
    pub hours_max: f64,
    pub fragility_points: i32,
}

impl SeverityCalibration {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.cost_min < 0.0 || self.hours_min < 0.0 || self.fragility_points < 0 {
            return Err(ConfigError::Invalid(format!("{} 标定值不能为负", name)));
        }
        if self.cost_min > self.cost_max {
            return Err(ConfigError::Invalid(format!(
                "{} 金额区间 min={} > max={}",
                name, self.cost_min, self.cost_max
            )));
        }
        if self.hours_min > self.hours_max {
            return Err(ConfigError::Invalid(format!(
                "{} 工时区间 min={} > max={}",
                name, self.hours_min, self.hours_max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureCalibration {
    pub blocking: SeverityCalibration,
    pub warning: SeverityCalibration,
}

impl Default for ExposureCalibration {
    fn default() -> Self {
        Self {
            blocking: SeverityCalibration {
                cost_min: 2000.0,
                cost_max: 6000.0,
                hours_min: 8.0,
                hours_max: 24.0,
                fragility_points: 25,
            },
            warning: SeverityCalibration {
                cost_min: 500.0,
                cost_max: 1500.0,
                hours_min: 2.0,
                hours_max: 6.0,
                fragility_points: 8,
            },
        }
    }
}

// ==========================================
// EngineConfig - 引擎配置全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub exposure: ExposureCalibration,
    pub fragility_cap: i32,
    pub top_stations_limit: usize,
    pub top_blockers_limit: usize,
    pub undo_window_secs: i64,
    pub undo_poll_interval_ms: u64,
    pub demand_escalation_hours: f64,
    pub remove_capacity_cap: i32,
    pub currency_symbol: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exposure: ExposureCalibration::default(),
            fragility_cap: 100,
            top_stations_limit: 8,
            top_blockers_limit: 5,
            undo_window_secs: 30,
            undo_poll_interval_ms: 1000,
            demand_escalation_hours: 20.0,
            remove_capacity_cap: 4,
            currency_symbol: "$".to_string(),
        }
    }
}

impl EngineConfig {
    /// 校验标定是否满足引擎不变量
    ///
    /// # 规则
    /// - 区间 min <= max, 且非负
    /// - BLOCKING 的金额与脆弱度点数严格大于 WARNING
    /// - 上限/条数/窗口必须为正
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.exposure.blocking;
        let w = &self.exposure.warning;
        b.validate("BLOCKING")?;
        w.validate("WARNING")?;

        if b.cost_min <= w.cost_min || b.cost_max <= w.cost_max {
            return Err(ConfigError::Invalid(
                "BLOCKING 金额区间必须严格大于 WARNING".to_string(),
            ));
        }
        if b.fragility_points <= w.fragility_points {
            return Err(ConfigError::Invalid(
                "BLOCKING 脆弱度点数必须严格大于 WARNING".to_string(),
            ));
        }
        if self.fragility_cap <= 0 {
            return Err(ConfigError::Invalid("fragility_cap 必须为正".to_string()));
        }
        if self.top_stations_limit == 0 || self.top_blockers_limit == 0 {
            return Err(ConfigError::Invalid("展示条数上限必须为正".to_string()));
        }
        if self.undo_window_secs <= 0 || self.undo_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("撤销窗口与轮询间隔必须为正".to_string()));
        }
        if self.demand_escalation_hours < 0.0 || self.remove_capacity_cap < 0 {
            return Err(ConfigError::Invalid("情景阈值不能为负".to_string()));
        }
        Ok(())
    }
}
