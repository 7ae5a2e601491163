//! Tabla ordenada de reglas de cuello de botella.
//!
//! Cada regla es un par (guarda, resultado). Se evalúan en orden y gana la
//! primera cuya guarda se cumple; si ninguna aplica se usa
//! `fallback_outcome`. Para insertar una regla nueva con cierta prioridad
//! basta con ubicarla en la posición correspondiente de la tabla.
use serde::Serialize;

use sim_domain::{BottleneckReason, SeverityTier, StageStatus, WorkflowItem, WorkflowStage};

/// Decisión de una regla (sin puntaje: éste se calcula después).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub reason: BottleneckReason,
    pub dominant_stage: WorkflowStage,
    pub severity: SeverityTier,
}

#[derive(Clone, Copy)]
pub struct BottleneckRule {
    /// Identificador estable (auditoría / logs).
    pub id: &'static str,
    pub applies: fn(&WorkflowItem) -> bool,
    pub outcome: fn(&WorkflowItem) -> RuleOutcome,
}

impl std::fmt::Debug for BottleneckRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BottleneckRule").field("id", &self.id).finish()
    }
}

fn design_blocked(item: &WorkflowItem) -> bool {
    item.design.is_blocked()
}

fn design_not_detailed(item: &WorkflowItem) -> bool {
    item.design.is_in_progress() && !item.simulation.has_started()
}

fn sim_blocked(item: &WorkflowItem) -> bool {
    item.design.is_complete() && item.simulation.is_blocked()
}

fn sim_changes_requested(item: &WorkflowItem) -> bool {
    item.design.is_complete() && item.simulation.status == StageStatus::ChangesRequested
}

/// Manufactura avanzó sin que la simulación esté aprobada/completa.
fn build_ahead_of_sim(item: &WorkflowItem) -> bool {
    item.design.is_complete() && !item.simulation.is_complete() && item.manufacture.has_started()
}

const fn outcome(reason: BottleneckReason, dominant_stage: WorkflowStage, severity: SeverityTier) -> RuleOutcome {
    RuleOutcome { reason, dominant_stage, severity }
}

fn design_blocked_outcome(_: &WorkflowItem) -> RuleOutcome {
    outcome(BottleneckReason::DesignBlocked, WorkflowStage::Design, SeverityTier::High)
}

fn design_not_detailed_outcome(_: &WorkflowItem) -> RuleOutcome {
    outcome(BottleneckReason::DesignNotDetailed, WorkflowStage::Design, SeverityTier::Medium)
}

fn sim_blocked_outcome(_: &WorkflowItem) -> RuleOutcome {
    outcome(BottleneckReason::SimBlocked, WorkflowStage::Simulation, SeverityTier::High)
}

fn sim_changes_requested_outcome(_: &WorkflowItem) -> RuleOutcome {
    outcome(BottleneckReason::SimChangesRequested, WorkflowStage::Simulation, SeverityTier::Medium)
}

fn build_ahead_of_sim_outcome(_: &WorkflowItem) -> RuleOutcome {
    outcome(BottleneckReason::BuildAheadOfSim, WorkflowStage::Simulation, SeverityTier::Critical)
}

/// Reglas de compuerta por etapa, en orden de prioridad.
pub static STAGE_GATE_RULES: &[BottleneckRule] =
    &[BottleneckRule { id: "design_blocked", applies: design_blocked, outcome: design_blocked_outcome },
      BottleneckRule { id: "design_not_detailed", applies: design_not_detailed, outcome: design_not_detailed_outcome },
      BottleneckRule { id: "sim_blocked", applies: sim_blocked, outcome: sim_blocked_outcome },
      BottleneckRule { id: "sim_changes_requested", applies: sim_changes_requested, outcome: sim_changes_requested_outcome },
      BottleneckRule { id: "build_ahead_of_sim", applies: build_ahead_of_sim, outcome: build_ahead_of_sim_outcome }];

/// Etapa menos avanzada; empates a favor de la más temprana (por eso
/// DESIGN cuando todas están completas).
pub fn least_complete_stage(item: &WorkflowItem) -> WorkflowStage {
    let mut best = WorkflowStage::Design;
    let mut best_completion = item.design.effective_completion();
    for stage in [WorkflowStage::Simulation, WorkflowStage::Manufacture] {
        let completion = item.stage(stage).effective_completion();
        if completion < best_completion {
            best = stage;
            best_completion = completion;
        }
    }
    best
}

/// Resultado cuando ninguna regla aplica.
pub fn fallback_outcome(item: &WorkflowItem) -> RuleOutcome {
    let stages = item.stages();
    let reason = if stages.iter().any(|s| s.has_data()) { BottleneckReason::Ok } else { BottleneckReason::Unknown };
    let severity = if stages.iter().any(|s| s.status == StageStatus::AtRisk) { SeverityTier::Low } else { SeverityTier::Ok };
    outcome(reason, least_complete_stage(item), severity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_domain::{StageStatusSnapshot, WorkItemKind};

    fn snap(stage: WorkflowStage, status: StageStatus, completion: Option<f64>) -> StageStatusSnapshot {
        StageStatusSnapshot { completion, ..StageStatusSnapshot::new(stage, status) }
    }

    fn item(design: (StageStatus, Option<f64>),
            simulation: (StageStatus, Option<f64>),
            manufacture: (StageStatus, Option<f64>))
            -> WorkflowItem {
        WorkflowItem::new("I-1",
                          WorkItemKind::WeldGun,
                          "010",
                          snap(WorkflowStage::Design, design.0, design.1),
                          snap(WorkflowStage::Simulation, simulation.0, simulation.1),
                          snap(WorkflowStage::Manufacture, manufacture.0, manufacture.1))
    }

    #[test]
    fn rule_ids_are_unique_and_in_priority_order() {
        let ids: Vec<&str> = STAGE_GATE_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids,
                   vec!["design_blocked", "design_not_detailed", "sim_blocked", "sim_changes_requested", "build_ahead_of_sim"]);
    }

    #[test]
    fn least_complete_prefers_earliest_on_ties() {
        let all_done = item((StageStatus::Complete, None), (StageStatus::Complete, None), (StageStatus::Complete, None));
        assert_eq!(least_complete_stage(&all_done), WorkflowStage::Design);

        let mfg_behind = item((StageStatus::Complete, Some(100.0)),
                              (StageStatus::Approved, None),
                              (StageStatus::InProgress, Some(30.0)));
        assert_eq!(least_complete_stage(&mfg_behind), WorkflowStage::Manufacture);
    }

    #[test]
    fn fallback_distinguishes_unknown_and_at_risk() {
        let empty = item((StageStatus::Unknown, None), (StageStatus::Unknown, None), (StageStatus::Unknown, None));
        let out = fallback_outcome(&empty);
        assert_eq!(out.reason, BottleneckReason::Unknown);
        assert_eq!(out.severity, SeverityTier::Ok);
        assert_eq!(out.dominant_stage, WorkflowStage::Design);

        let risky = item((StageStatus::AtRisk, Some(60.0)), (StageStatus::InProgress, Some(10.0)), (StageStatus::NotStarted, None));
        let out = fallback_outcome(&risky);
        assert_eq!(out.reason, BottleneckReason::Ok);
        assert_eq!(out.severity, SeverityTier::Low);
        assert_eq!(out.dominant_stage, WorkflowStage::Manufacture);
    }
}
