use serde_json::json;
use sim_domain::{CrossRefInput, SourceRecord, StageStatus, StationKey, WorkItemKind, WorkflowItem, WorkflowStage};

#[test]
fn test_cross_ref_input_from_export_json() {
    // Shape emitted by the ingestion layer: every collection optional, raw
    // columns kept in `raw`.
    let input: CrossRefInput = serde_json::from_value(json!({
        "simulation_status": [
            {"station": "STATION 010", "area": "UNDERBODY", "first_stage_completion": 80.0,
             "stage_metrics": {"reach": 90.0, "cycle_time": 70.0}, "raw": {"source_row": 4}}
        ],
        "weld_guns": [{"gun_key": "g100", "station": "010"}],
        "gun_forces": [{"gun_key": "G100", "required_force_kn": 3.5}]
    })).unwrap();

    assert_eq!(input.simulation_status.len(), 1);
    let sim = &input.simulation_status[0];
    assert_eq!(sim.station_key(), StationKey::normalize("010"));
    assert_eq!(sim.area_code(), Some("UNDERBODY"));
    assert_eq!(sim.stage_metrics.len(), 2);
    assert_eq!(sim.raw.get_f64("source_row"), Some(4.0));
    assert_eq!(input.weld_guns[0].normalized_gun_key(), input.gun_forces[0].normalized_gun_key());
}

#[test]
fn test_workflow_item_from_json_defaults_missing_stage_fields() {
    let item: WorkflowItem = serde_json::from_value(json!({
        "id": "T-100",
        "kind": "TOOLING",
        "context_key": "010",
        "design": {"stage": "DESIGN", "status": "COMPLETE", "completion": 100.0},
        "simulation": {"stage": "SIMULATION", "status": "IN_PROGRESS"},
        "manufacture": {"stage": "MANUFACTURE"}
    })).unwrap();

    assert_eq!(item.kind, WorkItemKind::Tooling);
    assert_eq!(item.stage(WorkflowStage::Design).status, StageStatus::Complete);
    assert_eq!(item.manufacture.status, StageStatus::Unknown);
    assert!(item.manufacture.completion.is_none());
    assert!(item.manufacture.updated_at.is_none());
}

#[test]
fn test_station_key_round_trips_as_plain_string() {
    let key = StationKey::normalize("OP-10").unwrap();
    assert_eq!(serde_json::to_value(&key).unwrap(), json!("10"));
}
