// ==========================================
// FragilityAggregator 集成测试
// ==========================================
// 职责: 验证脆弱度指数、就绪结论与重点岗位排名
// ==========================================

mod helpers;

use helpers::mock_config::{default_config, with_fragility_cap};
use helpers::test_data_builder::{mixed_issue_set, IssueBuilder};
use workforce_readiness::domain::types::{IssueType, ReadinessVerdict, Severity};
use workforce_readiness::domain::Issue;
use workforce_readiness::engine::FragilityAggregator;

fn aggregator() -> FragilityAggregator {
    FragilityAggregator::from_config(&default_config())
}

// ==========================================
// 脆弱度指数
// ==========================================

#[test]
fn test_one_blocking_two_warnings_is_41_no_go() {
    let summary = aggregator().aggregate(&mixed_issue_set());

    assert_eq!(summary.fragility_index, 41);
    assert_eq!(summary.verdict, ReadinessVerdict::NoGo);
    assert_eq!(summary.blocking_count, 1);
    assert_eq!(summary.warning_count, 2);
}

#[test]
fn test_aggregate_is_idempotent() {
    let issues = mixed_issue_set();
    let agg = aggregator();
    assert_eq!(agg.aggregate(&issues), agg.aggregate(&issues));
}

#[test]
fn test_adding_issue_never_lowers_fragility() {
    let agg = aggregator();
    let mut issues = Vec::new();
    let mut previous = agg.aggregate(&issues).fragility_index;

    for n in 0..12 {
        let builder = IssueBuilder::new(&format!("I-{}", n));
        let issue = if n % 3 == 0 {
            builder.blocking().build()
        } else {
            builder.warning().build()
        };
        issues.push(issue);

        let current = agg.aggregate(&issues).fragility_index;
        assert!(current >= previous, "{} < {} after {} issues", current, previous, n + 1);
        assert!(current <= 100);
        previous = current;
    }
}

#[test]
fn test_adding_blocking_never_improves_verdict() {
    let agg = aggregator();
    let baselines: Vec<(ReadinessVerdict, Vec<Issue>)> = vec![
        (ReadinessVerdict::Go, Vec::new()),
        (
            ReadinessVerdict::Warning,
            vec![IssueBuilder::new("W-1").warning().build()],
        ),
        (ReadinessVerdict::NoGo, mixed_issue_set()),
        (
            ReadinessVerdict::NoGo,
            vec![IssueBuilder::new("L-1").illegal().build()],
        ),
    ];

    for (expected, mut issues) in baselines {
        let mut previous = agg.aggregate(&issues);
        assert_eq!(previous.verdict, expected);

        for n in 0..6 {
            issues.push(IssueBuilder::new(&format!("B-{}", n)).blocking().build());
            let current = agg.aggregate(&issues);

            // Go < Warning < NoGo
            assert!(
                current.verdict >= previous.verdict,
                "{} improved to {} after adding a BLOCKING issue",
                previous.verdict,
                current.verdict
            );
            assert_eq!(current.verdict, ReadinessVerdict::NoGo);
            assert!(current.fragility_index >= previous.fragility_index);
            previous = current;
        }
    }
}

#[test]
fn test_fragility_is_capped() {
    let issues: Vec<Issue> = (0..5)
        .map(|n| IssueBuilder::new(&format!("B-{}", n)).blocking().build())
        .collect();

    assert_eq!(aggregator().aggregate(&issues).fragility_index, 100);

    let low_cap = FragilityAggregator::from_config(&with_fragility_cap(60));
    assert_eq!(low_cap.aggregate(&issues).fragility_index, 60);
}

#[test]
fn test_resolved_issues_do_not_count() {
    let issues = vec![
        IssueBuilder::new("I-1").blocking().resolved().build(),
        IssueBuilder::new("I-2").warning().build(),
    ];
    let summary = aggregator().aggregate(&issues);
    assert_eq!(summary.fragility_index, 8);
    assert_eq!(summary.verdict, ReadinessVerdict::Warning);
}

// ==========================================
// 就绪结论
// ==========================================

#[test]
fn test_illegal_forces_no_go() {
    let issues = vec![
        IssueBuilder::new("I-1").illegal().build(),
        IssueBuilder::new("I-2").warning().build(),
    ];
    let summary = aggregator().aggregate(&issues);
    assert_eq!(summary.verdict, ReadinessVerdict::NoGo);
    assert_eq!(summary.illegal_count, 1);
}

#[test]
fn test_verdict_precedence() {
    assert_eq!(FragilityAggregator::verdict_for(1, 0, 0), ReadinessVerdict::NoGo);
    assert_eq!(FragilityAggregator::verdict_for(0, 1, 5), ReadinessVerdict::NoGo);
    assert_eq!(FragilityAggregator::verdict_for(0, 0, 5), ReadinessVerdict::Warning);
    assert_eq!(FragilityAggregator::verdict_for(0, 0, 0), ReadinessVerdict::Go);
}

#[test]
fn test_empty_set_is_go() {
    let summary = aggregator().aggregate(&[]);
    assert_eq!(summary.fragility_index, 0);
    assert_eq!(summary.verdict, ReadinessVerdict::Go);
    assert!(summary.top_stations.is_empty());
}

// ==========================================
// 重点岗位
// ==========================================

#[test]
fn test_top_stations_order_and_dedup() {
    let issues = vec![
        IssueBuilder::new("I-1").warning().station("ST-PACK").build(),
        IssueBuilder::new("I-2")
            .blocking()
            .issue_type(IssueType::NoGo)
            .station("ST-WELD")
            .build(),
        IssueBuilder::new("I-3").illegal().station("ST-WELD").cause("Expired certificate").build(),
        IssueBuilder::new("I-4").blocking().station("ST-PAINT").build(),
    ];

    let top = aggregator().aggregate(&issues).top_stations;
    let ids: Vec<&str> = top.iter().map(|t| t.issue_id.as_str()).collect();

    // 同一岗位保留最严重的一条; BLOCKING 内 ILLEGAL 先于 UNSTAFFED 先于 NO_GO
    assert_eq!(ids, vec!["I-3", "I-4", "I-1"]);
    assert_eq!(top[0].primary_cause.as_deref(), Some("Expired certificate"));
    assert_eq!(top[0].severity, Severity::Blocking);
}

#[test]
fn test_stationless_issues_are_not_merged() {
    let issues = vec![
        IssueBuilder::new("I-1").warning().no_station().build(),
        IssueBuilder::new("I-2").warning().no_station().build(),
    ];

    let top = aggregator().aggregate(&issues).top_stations;
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|t| t.station_label == "Unassigned"));
}

#[test]
fn test_top_stations_limit() {
    let issues: Vec<Issue> = (0..12)
        .map(|n| IssueBuilder::new(&format!("I-{:02}", n)).build())
        .collect();

    let top = aggregator().aggregate(&issues).top_stations;
    assert_eq!(top.len(), 8);
    // 平局保持输入顺序
    assert_eq!(top[0].issue_id, "I-00");
    assert_eq!(top[7].issue_id, "I-07");
}

#[test]
fn test_unknown_issue_type_is_accepted() {
    let raw = r#"{
        "issue_id": "X-1",
        "severity": "WARNING",
        "issue_type": "FATIGUE",
        "station_id": null,
        "station_name": null,
        "shift_code": "B",
        "date": "2026-03-02"
    }"#;
    let issue: Issue = serde_json::from_str(raw).unwrap();
    assert_eq!(issue.issue_type, IssueType::Other);

    let summary = aggregator().aggregate(&[issue]);
    assert_eq!(summary.verdict, ReadinessVerdict::Warning);
    assert_eq!(summary.unstaffed_count, 0);
}
