// ==========================================
// 人力就绪度引擎 - 情景对比器
// ==========================================
// 职责: 情景输入 + 基线问题 → current / after / delta + 整改计划
// 输入: 基线问题快照 (只读) + 可选技能需求参考数据
// 红线: 只读, 不修改基线; 参考数据缺失时降级为通用提示, 不失败
// ==========================================

use crate::config::EngineConfig;
use crate::domain::exposure::{ExposureRange, ExposureSnapshot, ExposureUnit};
use crate::domain::issue::Issue;
use crate::domain::scenario::{PlanItem, ScenarioInput, ScenarioKind, ScenarioResult};
use crate::domain::skill::SkillRequirement;
use crate::domain::types::{PlanOwner, Severity};
use crate::engine::exposure::{Exposure, ExposureModel};
use crate::engine::fragility::FragilityAggregator;
use std::collections::HashSet;

/// 需求增加情景的准备周期上限 (周)
const MAX_DEMAND_TTR_WEEKS: f64 = 8.0;

// ==========================================
// ScenarioComparator
// ==========================================
#[derive(Debug, Clone)]
pub struct ScenarioComparator {
    aggregator: FragilityAggregator,
    demand_escalation_hours: f64,
    remove_capacity_cap: i32,
    top_blockers_limit: usize,
    currency_symbol: String,
}

impl ScenarioComparator {
    pub fn new(aggregator: FragilityAggregator, config: &EngineConfig) -> Self {
        Self {
            aggregator,
            demand_escalation_hours: config.demand_escalation_hours,
            remove_capacity_cap: config.remove_capacity_cap,
            top_blockers_limit: config.top_blockers_limit,
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(FragilityAggregator::from_config(config), config)
    }

    fn model(&self) -> &ExposureModel {
        self.aggregator.model()
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 情景对比
    ///
    /// # 步骤
    /// 1. 边界截断输入 (负数归零)
    /// 2. 由基线问题 + 未满足技能需求计算 current
    /// 3. 按情景类型计算 delta
    /// 4. after = clamp(current + delta)
    /// 5. 生成 top_blockers 与整改计划 (文本由 delta 插值)
    pub fn compare(
        &self,
        scenario: &ScenarioInput,
        baseline: &[Issue],
        requirements: Option<&[SkillRequirement]>,
    ) -> ScenarioResult {
        let scenario = scenario.sanitized();
        let kind = scenario.kind();

        let relevant = Self::relevant_issues(&scenario, baseline);
        let scoped = Self::scoped_requirements(&scenario, requirements.unwrap_or(&[]));

        let current = self.current_snapshot(&relevant, &scoped);
        let delta = self.scenario_delta(&scenario);
        let after = current.plus(&delta).clamped(self.aggregator.fragility_cap());

        let top_blockers = self.top_blockers(&scenario, &scoped);
        let plan = self.build_plan(&scenario, &current, &after, &delta);

        tracing::debug!(
            "情景对比: kind={}, relevant_issues={}, requirements={}, fragility {} → {}",
            kind,
            relevant.len(),
            scoped.len(),
            current.fragility,
            after.fragility
        );

        ScenarioResult {
            kind,
            current,
            after,
            delta,
            top_blockers,
            plan,
        }
    }

    // ==========================================
    // 范围筛选
    // ==========================================

    /// 与情景相关的未解决问题: 同班次; 产线类情景还需同产线
    fn relevant_issues<'a>(scenario: &ScenarioInput, baseline: &'a [Issue]) -> Vec<&'a Issue> {
        baseline
            .iter()
            .filter(|i| i.is_open() && i.in_shift(scenario.shift()))
            .filter(|i| scenario.line().map_or(true, |line| i.on_line(line)))
            .collect()
    }

    /// 与情景相关的技能需求
    fn scoped_requirements<'a>(
        scenario: &ScenarioInput,
        requirements: &'a [SkillRequirement],
    ) -> Vec<&'a SkillRequirement> {
        requirements
            .iter()
            .filter(|r| match scenario {
                ScenarioInput::AddStation { station, skill, .. } => {
                    r.station_id == *station || r.skill.eq_ignore_ascii_case(skill)
                }
                ScenarioInput::IncreaseDemand { line, .. }
                | ScenarioInput::RemoveCapacity { line, .. } => r
                    .line
                    .as_deref()
                    .map_or(true, |own| own.eq_ignore_ascii_case(line)),
            })
            .collect()
    }

    // ==========================================
    // 快照计算
    // ==========================================

    /// current 快照
    ///
    /// - 相关问题按各自严重度计入
    /// - 没有对应问题的岗位上未满足的技能需求按 WARNING 计入 (既有缺口)
    /// - 培训负荷 = 相关技能需求缺口人数之和
    fn current_snapshot(&self, relevant: &[&Issue], scoped: &[&SkillRequirement]) -> ExposureSnapshot {
        let covered: HashSet<&str> = relevant
            .iter()
            .filter_map(|i| i.station_id.as_deref())
            .collect();
        let extra_blockers = scoped
            .iter()
            .filter(|r| r.is_unmet() && !covered.contains(r.station_id.as_str()))
            .count() as u32;

        let blocking = relevant.iter().filter(|i| i.severity == Severity::Blocking).count() as u32;
        let warning = relevant.iter().filter(|i| i.severity == Severity::Warning).count() as u32
            + extra_blockers;

        let b = self.model().exposure_for(Severity::Blocking).times(blocking);
        let w = self.model().exposure_for(Severity::Warning).times(warning);

        let training_load = scoped
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.gap()));

        ExposureSnapshot {
            fragility: self.aggregator.fragility_index(blocking, warning),
            cost: b.cost.plus(&w.cost),
            time: b.time.plus(&w.time),
            time_to_readiness_weeks: 0,
            training_load: i32::try_from(training_load).unwrap_or(i32::MAX),
        }
        .clamped(self.aggregator.fragility_cap())
    }

    /// 情景自身的 delta (按类型穷举)
    fn scenario_delta(&self, scenario: &ScenarioInput) -> ExposureSnapshot {
        let cap = self.aggregator.fragility_cap();
        match scenario {
            ScenarioInput::AddStation { .. } => {
                // 新岗位吸收一个 WARNING 单位的暴露
                let unit = self.model().exposure_for(Severity::Warning);
                ExposureSnapshot {
                    fragility: -unit.fragility_points,
                    cost: unit.cost.negate(),
                    time: unit.time.negate(),
                    time_to_readiness_weeks: 2,
                    training_load: 1,
                }
            }
            ScenarioInput::IncreaseDemand { delta_hours, .. } => {
                if *delta_hours <= 0.0 {
                    return ExposureSnapshot::zero();
                }
                let unit = self.model().exposure_for(self.demand_severity(*delta_hours));
                // 在 f64 中截断后再转换, 任意大的有限工时都不会溢出
                let ttr = (2.0 + (delta_hours / 15.0).ceil()).min(MAX_DEMAND_TTR_WEEKS) as i32;
                let training = (delta_hours / 8.0).ceil().min(f64::from(i32::MAX)) as i32;
                Self::positive_delta(&unit, cap, ttr, training)
            }
            ScenarioInput::RemoveCapacity { people_removed, .. } => {
                let removed = self.capped_removal(*people_removed);
                if removed == 0 {
                    return ExposureSnapshot::zero();
                }
                let unit = self
                    .model()
                    .exposure_for(Severity::Blocking)
                    .times(removed as u32);
                Self::positive_delta(&unit, cap, 1, removed)
            }
        }
    }

    fn positive_delta(unit: &Exposure, cap: i32, ttr_weeks: i32, training: i32) -> ExposureSnapshot {
        ExposureSnapshot {
            fragility: unit.fragility_points.min(cap),
            cost: ExposureRange::shift(ExposureUnit::Currency, unit.cost.min, unit.cost.max),
            time: ExposureRange::shift(ExposureUnit::Hours, unit.time.min, unit.time.max),
            time_to_readiness_weeks: ttr_weeks,
            training_load: training,
        }
    }

    /// 需求增量 >= 阈值时按 BLOCKING 计
    fn demand_severity(&self, delta_hours: f64) -> Severity {
        if delta_hours >= self.demand_escalation_hours {
            Severity::Blocking
        } else {
            Severity::Warning
        }
    }

    fn capped_removal(&self, people_removed: i32) -> i32 {
        people_removed.clamp(0, self.remove_capacity_cap)
    }

    // ==========================================
    // 阻塞项标签
    // ==========================================

    /// 只列出未满足的需求, 缺口大的在前, 去重后截取上限
    ///
    /// 无数据或全部已满足时使用通用提示
    fn top_blockers(&self, scenario: &ScenarioInput, scoped: &[&SkillRequirement]) -> Vec<String> {
        let mut ordered: Vec<&SkillRequirement> =
            scoped.iter().copied().filter(|r| r.is_unmet()).collect();
        ordered.sort_by_key(|r| std::cmp::Reverse(r.gap()));

        let mut seen = HashSet::new();
        let labels: Vec<String> = ordered
            .into_iter()
            .map(|r| r.label())
            .filter(|label| seen.insert(label.clone()))
            .take(self.top_blockers_limit)
            .collect();

        if !labels.is_empty() {
            return labels;
        }

        tracing::debug!("无未满足的技能需求, 使用通用阻塞项: kind={}", scenario.kind());
        let mut fallback = Self::placeholder_blockers(scenario);
        fallback.truncate(self.top_blockers_limit);
        fallback
    }

    fn placeholder_blockers(scenario: &ScenarioInput) -> Vec<String> {
        match scenario {
            ScenarioInput::AddStation { station, skill, shift } => vec![
                format!("{} qualification at {}", skill, station),
                format!("Supervisor sign-off for {}", station),
                format!("Shift {} roster update", shift),
            ],
            ScenarioInput::IncreaseDemand { line, shift, .. } => vec![
                format!("Cross-trained operators on {}", line),
                format!("Overtime approval for shift {}", shift),
                format!("Critical-skill coverage on {}", line),
            ],
            ScenarioInput::RemoveCapacity { line, shift, people_removed } => vec![
                format!("Backfill for {} removed operator(s) on {}", people_removed, line),
                format!("Critical-skill coverage on {}", line),
                format!("Shift {} minimum staffing", shift),
            ],
        }
    }

    // ==========================================
    // 整改计划
    // ==========================================

    /// 固定长度的整改计划, outcome 均由计算结果插值
    fn build_plan(
        &self,
        scenario: &ScenarioInput,
        current: &ExposureSnapshot,
        after: &ExposureSnapshot,
        delta: &ExposureSnapshot,
    ) -> Vec<PlanItem> {
        let ttr = after.time_to_readiness_weeks.max(0) as u32;
        let cost = self.format_money_shift(&delta.cost);
        let hours = format_hours_shift(&delta.time);
        let fragility_move = format!(
            "Fragility {} → {} ({})",
            current.fragility,
            after.fragility,
            format_points(delta.fragility)
        );

        match scenario {
            ScenarioInput::AddStation { station, skill, shift } => vec![
                item(
                    format!("Staff {} with a {}-qualified operator", station, skill),
                    PlanOwner::Ops,
                    ttr,
                    format!("{}; cost exposure {}", fragility_move, cost),
                ),
                item(
                    format!("Qualify {} operator(s) in {}", delta.training_load, skill),
                    PlanOwner::Hr,
                    ttr,
                    format!(
                        "Training load {} → {}; ready in {} week(s)",
                        current.training_load, after.training_load, ttr
                    ),
                ),
                item(
                    format!("Publish shift {} roster including {}", shift, station),
                    PlanOwner::Supervisor,
                    1,
                    format!("Hours exposure {}", hours),
                ),
                item(
                    format!("Review readiness for {} after go-live", station),
                    PlanOwner::Ops,
                    ttr,
                    format!("Target fragility {}", after.fragility),
                ),
            ],
            ScenarioInput::IncreaseDemand { line, delta_hours, shift } => {
                let escalated = self.demand_severity(*delta_hours) == Severity::Blocking
                    && *delta_hours > 0.0;
                let last = if escalated {
                    item(
                        format!("Escalate {} demand plan to operations review", line),
                        PlanOwner::Ops,
                        0,
                        format!(
                            "+{}h is at or above the {}h threshold; sized as BLOCKING ({})",
                            format_number(*delta_hours),
                            format_number(self.demand_escalation_hours),
                            format_points(delta.fragility)
                        ),
                    )
                } else {
                    item(
                        format!("Monitor demand on {}", line),
                        PlanOwner::Supervisor,
                        1,
                        format!(
                            "+{}h is below the {}h threshold; sized as WARNING ({})",
                            format_number(*delta_hours),
                            format_number(self.demand_escalation_hours),
                            format_points(delta.fragility)
                        ),
                    )
                };
                vec![
                    item(
                        format!("Approve overtime for +{}h on {}", format_number(*delta_hours), line),
                        PlanOwner::Ops,
                        0,
                        format!("Cost exposure {}", cost),
                    ),
                    item(
                        format!("Cross-train operators for {}", line),
                        PlanOwner::Hr,
                        ttr,
                        format!(
                            "Training load {} → {}; ready in {} week(s)",
                            current.training_load, after.training_load, ttr
                        ),
                    ),
                    item(
                        format!("Rebalance shift {} assignments", shift),
                        PlanOwner::Supervisor,
                        1,
                        format!("Hours exposure {}", hours),
                    ),
                    item(
                        format!("Line up temporary labour for {}", line),
                        PlanOwner::Hr,
                        ttr,
                        fragility_move.clone(),
                    ),
                    last,
                ]
            }
            ScenarioInput::RemoveCapacity { line, people_removed, shift } => {
                let removed = self.capped_removal(*people_removed);
                vec![
                    item(
                        format!("Backfill {} operator(s) on {}", removed, line),
                        PlanOwner::Hr,
                        ttr,
                        format!("{}; cost exposure {}", fragility_move, cost),
                    ),
                    item(
                        format!("Reassign critical skills on shift {}", shift),
                        PlanOwner::Supervisor,
                        0,
                        format!("Hours exposure {}", hours),
                    ),
                    item(
                        format!("Approve interim overtime for {}", line),
                        PlanOwner::Ops,
                        0,
                        format!("Holds fragility at {} until backfill lands", after.fragility),
                    ),
                    item(
                        format!("Qualify replacements for {}", line),
                        PlanOwner::Hr,
                        ttr,
                        format!(
                            "Training load {} → {}; ready in {} week(s)",
                            current.training_load, after.training_load, ttr
                        ),
                    ),
                ]
            }
        }
    }

    fn format_money_shift(&self, range: &ExposureRange) -> String {
        format!(
            "{} to {}",
            format_signed_money(range.min, &self.currency_symbol),
            format_signed_money(range.max, &self.currency_symbol)
        )
    }
}

impl Default for ScenarioComparator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

fn item(title: String, owner: PlanOwner, eta_weeks: u32, outcome: String) -> PlanItem {
    PlanItem {
        title,
        owner,
        eta_weeks,
        outcome,
    }
}

// ==========================================
// 文本格式化
// ==========================================

fn format_points(points: i32) -> String {
    if points > 0 {
        format!("+{} pts", points)
    } else {
        format!("{} pts", points)
    }
}

fn format_hours_shift(range: &ExposureRange) -> String {
    format!("{}h to {}h", signed(range.min), signed(range.max))
}

fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_number(value))
    } else {
        format_number(value)
    }
}

fn format_signed_money(value: f64, symbol: &str) -> String {
    let body = format!("{}{}", symbol, group_thousands(value.abs().round() as u64));
    if value > 0.0 {
        format!("+{}", body)
    } else if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// 整数不带小数, 其余保留一位
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
