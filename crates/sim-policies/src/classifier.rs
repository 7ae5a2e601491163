//! Clasificador de cuellos de botella.
//!
//! Función pura: el mismo ítem produce siempre el mismo motivo, etapa
//! dominante y puntaje. Identidad, tipo, clave de contexto y las tres
//! etapas se copian tal cual al resultado.
use sim_domain::{WorkflowBottleneckStatus, WorkflowItem};

use crate::rules::{fallback_outcome, BottleneckRule, RuleOutcome, STAGE_GATE_RULES};
use crate::scoring::severity_score;

/// Contrato de políticas de clasificación deterministas.
pub trait BottleneckPolicy {
    fn id(&self) -> &'static str;
    fn classify(&self, item: &WorkflowItem) -> WorkflowBottleneckStatus;
}

/// Política por compuertas de etapa: tabla ordenada, gana la primera regla
/// que aplica.
#[derive(Debug, Clone)]
pub struct StageGatePolicy {
    rules: Vec<BottleneckRule>,
}

impl Default for StageGatePolicy {
    fn default() -> Self {
        Self { rules: STAGE_GATE_RULES.to_vec() }
    }
}

impl StageGatePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Política con una tabla de reglas propia (el fallback se mantiene).
    pub fn with_rules(rules: Vec<BottleneckRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[BottleneckRule] {
        &self.rules
    }

    /// Primera regla que aplica, o el fallback; devuelve también el id de
    /// la regla ganadora (`"fallback"` si ninguna aplicó).
    pub fn evaluate(&self, item: &WorkflowItem) -> (&'static str, RuleOutcome) {
        self.rules
            .iter()
            .find(|rule| (rule.applies)(item))
            .map(|rule| (rule.id, (rule.outcome)(item)))
            .unwrap_or_else(|| ("fallback", fallback_outcome(item)))
    }
}

impl BottleneckPolicy for StageGatePolicy {
    fn id(&self) -> &'static str {
        "stage_gate"
    }

    fn classify(&self, item: &WorkflowItem) -> WorkflowBottleneckStatus {
        let (_, decision) = self.evaluate(item);
        WorkflowBottleneckStatus { item_id: item.id.clone(),
                                   kind: item.kind,
                                   context_key: item.context_key.clone(),
                                   design: item.design.clone(),
                                   simulation: item.simulation.clone(),
                                   manufacture: item.manufacture.clone(),
                                   dominant_stage: decision.dominant_stage,
                                   reason: decision.reason,
                                   severity: decision.severity,
                                   severity_score: severity_score(item, decision.dominant_stage, decision.severity) }
    }
}

/// Clasifica con la política por defecto.
pub fn classify_item(item: &WorkflowItem) -> WorkflowBottleneckStatus {
    StageGatePolicy::default().classify(item)
}

/// Clasifica una población preservando el orden de entrada.
pub fn classify_all<P: BottleneckPolicy + ?Sized>(policy: &P, items: &[WorkflowItem]) -> Vec<WorkflowBottleneckStatus> {
    let statuses: Vec<WorkflowBottleneckStatus> = items.iter().map(|item| policy.classify(item)).collect();
    log::debug!("{}: {} ítems clasificados", policy.id(), statuses.len());
    statuses
}
