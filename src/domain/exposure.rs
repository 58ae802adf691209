// ==========================================
// 人力就绪度引擎 - 暴露量领域模型
// ==========================================
// 职责: 金额/工时区间与暴露快照
// 红线: current/after 快照必须 min <= max 且非负
//       delta 快照为逐边界位移, 允许为负
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 区间单位
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExposureUnit {
    Currency,
    Hours,
}

// ==========================================
// ExposureRange - 带单位的区间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureRange {
    pub unit: ExposureUnit,
    pub min: f64,
    pub max: f64,
}

impl ExposureRange {
    /// 构造规范区间 (非负, min <= max)
    pub fn new(unit: ExposureUnit, min: f64, max: f64) -> Self {
        Self { unit, min, max }.clamp_non_negative()
    }

    pub fn zero(unit: ExposureUnit) -> Self {
        Self { unit, min: 0.0, max: 0.0 }
    }

    /// 逐边界位移 (不做规范化, 用于 delta)
    pub fn shift(unit: ExposureUnit, min: f64, max: f64) -> Self {
        Self { unit, min, max }
    }

    /// 逐边界相加, 单位以 self 为准
    pub fn plus(&self, other: &ExposureRange) -> Self {
        Self {
            unit: self.unit,
            min: self.min + other.min,
            max: self.max + other.max,
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            unit: self.unit,
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// 截断到非负并保证 min <= max
    pub fn clamp_non_negative(&self) -> Self {
        let min = self.min.max(0.0);
        let max = self.max.max(0.0);
        Self {
            unit: self.unit,
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }
}

// ==========================================
// ExposureSnapshot - 某一时点的暴露量
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureSnapshot {
    pub fragility: i32,
    pub cost: ExposureRange,
    pub time: ExposureRange,
    pub time_to_readiness_weeks: i32,
    pub training_load: i32,
}

impl ExposureSnapshot {
    pub fn zero() -> Self {
        Self {
            fragility: 0,
            cost: ExposureRange::zero(ExposureUnit::Currency),
            time: ExposureRange::zero(ExposureUnit::Hours),
            time_to_readiness_weeks: 0,
            training_load: 0,
        }
    }

    /// 叠加 delta (不做截断, 整数项饱和相加)
    pub fn plus(&self, delta: &ExposureSnapshot) -> Self {
        Self {
            fragility: self.fragility.saturating_add(delta.fragility),
            cost: self.cost.plus(&delta.cost),
            time: self.time.plus(&delta.time),
            time_to_readiness_weeks: self
                .time_to_readiness_weeks
                .saturating_add(delta.time_to_readiness_weeks),
            training_load: self.training_load.saturating_add(delta.training_load),
        }
    }

    /// 截断: 脆弱度 [0, cap], 区间与计数非负
    pub fn clamped(&self, fragility_cap: i32) -> Self {
        Self {
            fragility: self.fragility.clamp(0, fragility_cap),
            cost: self.cost.clamp_non_negative(),
            time: self.time.clamp_non_negative(),
            time_to_readiness_weeks: self.time_to_readiness_weeks.max(0),
            training_load: self.training_load.max(0),
        }
    }
}
