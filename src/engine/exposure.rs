// ==========================================
// 人力就绪度引擎 - 暴露量模型
// ==========================================
// 职责: 严重度 → (金额区间, 工时区间, 脆弱度点数)
// 红线: 纯函数, 对两种严重度全定义, 无失败模式
// ==========================================

use crate::config::{ExposureCalibration, SeverityCalibration};
use crate::domain::exposure::{ExposureRange, ExposureUnit};
use crate::domain::types::Severity;
use serde::{Deserialize, Serialize};

/// 单个严重度对应的暴露量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    pub cost: ExposureRange,
    pub time: ExposureRange,
    pub fragility_points: i32,
}

impl Exposure {
    /// 按件数放大 (n 个同级问题)
    pub fn times(&self, n: u32) -> Exposure {
        let factor = f64::from(n);
        Exposure {
            cost: self.cost.scale(factor),
            time: self.time.scale(factor),
            fragility_points: self.fragility_points.saturating_mul(n as i32),
        }
    }
}

// ==========================================
// ExposureModel - 暴露量查表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureModel {
    blocking: Exposure,
    warning: Exposure,
}

impl ExposureModel {
    pub fn new(calibration: &ExposureCalibration) -> Self {
        Self {
            blocking: Self::from_calibration(&calibration.blocking),
            warning: Self::from_calibration(&calibration.warning),
        }
    }

    fn from_calibration(c: &SeverityCalibration) -> Exposure {
        Exposure {
            cost: ExposureRange::new(ExposureUnit::Currency, c.cost_min, c.cost_max),
            time: ExposureRange::new(ExposureUnit::Hours, c.hours_min, c.hours_max),
            fragility_points: c.fragility_points.max(0),
        }
    }

    /// 查询严重度的暴露量
    pub fn exposure_for(&self, severity: Severity) -> Exposure {
        match severity {
            Severity::Blocking => self.blocking,
            Severity::Warning => self.warning,
        }
    }

    pub fn fragility_points(&self, severity: Severity) -> i32 {
        self.exposure_for(severity).fragility_points
    }
}

impl Default for ExposureModel {
    fn default() -> Self {
        Self::new(&ExposureCalibration::default())
    }
}
