//! Ranking y estadísticas sobre ítems ya clasificados (no reclasifica).
use serde::Serialize;
use std::collections::BTreeMap;

use sim_domain::{SeverityTier, WorkflowBottleneckStatus, WorkflowStage};

/// Orden descendente por puntaje (estable en empates) y truncado opcional.
pub fn rank_bottlenecks(statuses: &[WorkflowBottleneckStatus], limit: Option<usize>) -> Vec<WorkflowBottleneckStatus> {
    let mut ranked = statuses.to_vec();
    ranked.sort_by(|a, b| b.severity_score.total_cmp(&a.severity_score));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BottleneckStats {
    pub total: usize,
    /// Todos los niveles presentes (con 0 si no hay ítems).
    pub by_severity: BTreeMap<SeverityTier, usize>,
    /// Todas las etapas presentes (con 0 si no hay ítems).
    pub by_stage: BTreeMap<WorkflowStage, usize>,
}

pub fn bottleneck_stats(statuses: &[WorkflowBottleneckStatus]) -> BottleneckStats {
    let mut stats = BottleneckStats { total: statuses.len(),
                                      by_severity: [SeverityTier::Ok,
                                                    SeverityTier::Low,
                                                    SeverityTier::Medium,
                                                    SeverityTier::High,
                                                    SeverityTier::Critical].into_iter()
                                                                           .map(|t| (t, 0))
                                                                           .collect(),
                                      by_stage: WorkflowStage::ALL.into_iter().map(|s| (s, 0)).collect() };
    for status in statuses {
        *stats.by_severity.entry(status.severity).or_default() += 1;
        *stats.by_stage.entry(status.dominant_stage).or_default() += 1;
    }
    stats
}
