use sim_domain::{BottleneckReason, SeverityTier, StageStatus, StageStatusSnapshot, WorkItemKind, WorkflowItem, WorkflowStage};
use sim_policies::{bottleneck_stats, classify_all, classify_item, rank_bottlenecks, BottleneckPolicy, StageGatePolicy};

fn stage(stage: WorkflowStage, status: StageStatus, completion: Option<f64>) -> StageStatusSnapshot {
    let snap = StageStatusSnapshot::new(stage, status);
    match completion {
        Some(c) => snap.with_completion(c).unwrap(),
        None => snap,
    }
}

fn item(id: &str,
        design: (StageStatus, Option<f64>),
        simulation: (StageStatus, Option<f64>),
        manufacture: (StageStatus, Option<f64>))
        -> WorkflowItem {
    WorkflowItem::new(id,
                      WorkItemKind::Tooling,
                      "010",
                      stage(WorkflowStage::Design, design.0, design.1),
                      stage(WorkflowStage::Simulation, simulation.0, simulation.1),
                      stage(WorkflowStage::Manufacture, manufacture.0, manufacture.1))
}

fn population() -> Vec<WorkflowItem> {
    vec![item("blocked-design",
              (StageStatus::Blocked, Some(30.0)),
              (StageStatus::NotStarted, None),
              (StageStatus::NotStarted, None)),
         item("build-ahead",
              (StageStatus::Complete, Some(100.0)),
              (StageStatus::InProgress, Some(50.0)),
              (StageStatus::InProgress, Some(20.0))),
         item("healthy",
              (StageStatus::Complete, Some(100.0)),
              (StageStatus::Approved, Some(100.0)),
              (StageStatus::InProgress, Some(60.0))),
         item("no-data",
              (StageStatus::Unknown, None),
              (StageStatus::Unknown, None),
              (StageStatus::Unknown, None)),
         item("sim-rework",
              (StageStatus::Approved, None),
              (StageStatus::ChangesRequested, Some(70.0)),
              (StageStatus::NotStarted, None))]
}

#[test]
fn test_blocked_design_dominates() {
    let status = classify_item(&item("T-1",
                                     (StageStatus::Blocked, None),
                                     (StageStatus::NotStarted, None),
                                     (StageStatus::NotStarted, None)));
    assert_eq!(status.reason, BottleneckReason::DesignBlocked);
    assert_eq!(status.dominant_stage, WorkflowStage::Design);
    assert_eq!(status.severity, SeverityTier::High);
    // 100 - 0 + 20
    assert_eq!(status.severity_score, 120.0);
}

#[test]
fn test_build_ahead_of_simulation_is_critical() {
    let status = classify_item(&item("T-2",
                                     (StageStatus::Complete, Some(100.0)),
                                     (StageStatus::InProgress, Some(50.0)),
                                     (StageStatus::InProgress, Some(20.0))));
    assert_eq!(status.reason, BottleneckReason::BuildAheadOfSim);
    assert_eq!(status.dominant_stage, WorkflowStage::Simulation);
    assert_eq!(status.severity, SeverityTier::Critical);
    assert_eq!(status.severity_score, 80.0);
    assert!(status.severity_score >= 30.0);
}

#[test]
fn test_design_in_progress_without_simulation() {
    let status = classify_item(&item("T-3",
                                     (StageStatus::InProgress, Some(40.0)),
                                     (StageStatus::NotStarted, None),
                                     (StageStatus::Unknown, None)));
    assert_eq!(status.reason, BottleneckReason::DesignNotDetailed);
    assert_eq!(status.severity, SeverityTier::Medium);
    assert_eq!(status.severity_score, 70.0);
}

#[test]
fn test_simulation_blocked_after_design() {
    let status = classify_item(&item("T-4",
                                     (StageStatus::Complete, None),
                                     (StageStatus::Blocked, Some(10.0)),
                                     (StageStatus::NotStarted, None)));
    assert_eq!(status.reason, BottleneckReason::SimBlocked);
    assert_eq!(status.dominant_stage, WorkflowStage::Simulation);
    assert_eq!(status.severity, SeverityTier::High);
}

#[test]
fn test_rule_priority_blocked_design_beats_build_ahead() {
    // manufacture started while design is blocked: rule order decides
    let status = classify_item(&item("T-5",
                                     (StageStatus::Blocked, Some(100.0)),
                                     (StageStatus::InProgress, Some(50.0)),
                                     (StageStatus::InProgress, Some(20.0))));
    assert_eq!(status.reason, BottleneckReason::DesignBlocked);
}

#[test]
fn test_healthy_and_empty_items_fall_back() {
    let items = population();
    let healthy = classify_item(&items[2]);
    assert_eq!(healthy.reason, BottleneckReason::Ok);
    assert_eq!(healthy.severity, SeverityTier::Ok);
    assert_eq!(healthy.dominant_stage, WorkflowStage::Manufacture);
    assert_eq!(healthy.severity_score, 40.0);

    let empty = classify_item(&items[3]);
    assert_eq!(empty.reason, BottleneckReason::Unknown);
    assert_eq!(empty.dominant_stage, WorkflowStage::Design);
}

#[test]
fn test_at_risk_fallback_is_low() {
    let status = classify_item(&item("T-6",
                                     (StageStatus::Complete, None),
                                     (StageStatus::AtRisk, Some(80.0)),
                                     (StageStatus::NotStarted, None)));
    assert_eq!(status.reason, BottleneckReason::Ok);
    assert_eq!(status.severity, SeverityTier::Low);
}

#[test]
fn test_classification_copies_identity_and_stages() {
    let source = population().remove(1);
    let status = classify_item(&source);
    assert_eq!(status.item_id, source.id);
    assert_eq!(status.kind, source.kind);
    assert_eq!(status.context_key, source.context_key);
    assert_eq!(status.design, source.design);
    assert_eq!(status.simulation, source.simulation);
    assert_eq!(status.manufacture, source.manufacture);
}

#[test]
fn test_classification_is_deterministic() {
    let items = population();
    let policy = StageGatePolicy::default();
    let first = classify_all(&policy, &items);
    let second = classify_all(&policy, &items);
    assert_eq!(first, second);
    assert_eq!(policy.id(), "stage_gate");
    let ids: Vec<&str> = first.iter().map(|s| s.item_id.as_str()).collect();
    assert_eq!(ids, vec!["blocked-design", "build-ahead", "healthy", "no-data", "sim-rework"]);
}

#[test]
fn test_ranking_is_descending_and_stable() {
    let statuses = classify_all(&StageGatePolicy::default(), &population());
    let ranked = rank_bottlenecks(&statuses, None);
    assert_eq!(ranked.len(), statuses.len());
    for pair in ranked.windows(2) {
        assert!(pair[0].severity_score >= pair[1].severity_score);
    }
    let ids: Vec<&str> = ranked.iter().map(|s| s.item_id.as_str()).collect();
    // healthy and sim-rework both score 40; input order is kept
    assert_eq!(ids, vec!["no-data", "blocked-design", "build-ahead", "healthy", "sim-rework"]);
}

#[test]
fn test_ranking_limit_is_prefix_of_full_ranking() {
    let statuses = classify_all(&StageGatePolicy::default(), &population());
    let full = rank_bottlenecks(&statuses, None);
    for n in 0..=statuses.len() + 1 {
        let limited = rank_bottlenecks(&statuses, Some(n));
        assert_eq!(limited.as_slice(), &full[..n.min(full.len())]);
    }
}

#[test]
fn test_stats_cover_every_tier_and_stage() {
    let statuses = classify_all(&StageGatePolicy::default(), &population());
    let stats = bottleneck_stats(&statuses);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.by_severity.len(), 5);
    assert_eq!(stats.by_stage.len(), 3);
    assert_eq!(stats.by_severity[&SeverityTier::Critical], 1);
    assert_eq!(stats.by_severity.values().sum::<usize>(), 5);
    assert_eq!(stats.by_stage.values().sum::<usize>(), 5);

    let empty = bottleneck_stats(&[]);
    assert_eq!(empty.total, 0);
    assert!(empty.by_severity.values().all(|&n| n == 0));
}

#[test]
fn test_stats_and_outcomes_serialize_with_wire_names() {
    let statuses = classify_all(&StageGatePolicy::default(), &population());
    let value = serde_json::to_value(bottleneck_stats(&statuses)).unwrap();
    assert_eq!(value["total"], serde_json::json!(5));
    assert_eq!(value["by_severity"]["CRITICAL"], serde_json::json!(1));
    assert_eq!(value["by_severity"]["OK"], serde_json::json!(2));
    assert_eq!(value["by_stage"]["MANUFACTURE"], serde_json::json!(1));

    let (_, outcome) = StageGatePolicy::default().evaluate(&population()[1]);
    assert_eq!(serde_json::to_value(outcome).unwrap(),
               serde_json::json!({"reason": "BUILD_AHEAD_OF_SIM", "dominant_stage": "SIMULATION", "severity": "CRITICAL"}));
}
