//! sim-policies – clasificación de cuellos de botella del pipeline
//! DESIGN → SIMULATION → MANUFACTURE.
//!
//! Provee el contrato `BottleneckPolicy`, la implementación por compuertas
//! (`StageGatePolicy`) basada en una tabla ordenada de reglas, el puntaje de
//! severidad y las proyecciones de ranking/estadísticas.

pub mod classifier;
pub mod ranking;
pub mod rules;
pub mod scoring;

pub use classifier::{classify_all, classify_item, BottleneckPolicy, StageGatePolicy};
pub use ranking::{bottleneck_stats, rank_bottlenecks, BottleneckStats};
pub use rules::{fallback_outcome, least_complete_stage, BottleneckRule, RuleOutcome, STAGE_GATE_RULES};
pub use scoring::{severity_boost, severity_score, MAX_SEVERITY_SCORE};
