//! Puntaje de severidad comparable entre ítems.
//!
//! puntaje = clamp(100 − avance(etapa dominante), 0, 100) + bonificación,
//! con tope 120. Bonificación: CRITICAL 30, HIGH 20, MEDIUM 10, resto 0.
use sim_domain::{SeverityTier, WorkflowItem, WorkflowStage};

pub const MAX_SEVERITY_SCORE: f64 = 120.0;

pub fn severity_boost(severity: SeverityTier) -> f64 {
    match severity {
        SeverityTier::Critical => 30.0,
        SeverityTier::High => 20.0,
        SeverityTier::Medium => 10.0,
        SeverityTier::Low | SeverityTier::Ok => 0.0,
    }
}

pub fn severity_score(item: &WorkflowItem, dominant_stage: WorkflowStage, severity: SeverityTier) -> f64 {
    let remaining = (100.0 - item.stage(dominant_stage).effective_completion()).clamp(0.0, 100.0);
    (remaining + severity_boost(severity)).min(MAX_SEVERITY_SCORE)
}
