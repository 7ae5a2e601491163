//! Paquete de entrada (snapshot exportado por la capa de ingesta) y
//! ensamblado del reporte de tablero.
//!
//! El paquete es la única frontera que puede fallar de forma dura: JSON mal
//! formado o ítems de flujo incoherentes. Dentro del núcleo los problemas de
//! datos se convierten en flags.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use sim_core::constants::ENGINE_VERSION;
use sim_core::{build_cross_ref, result_fingerprint, score_stations, summarize_cells, CellHealthSummary, StationHealthScore};
use sim_domain::{CrossRefInput, CrossRefResult, WorkflowBottleneckStatus, WorkflowItem, WorkflowStage};
use sim_policies::{bottleneck_stats, classify_all, rank_bottlenecks, BottleneckStats, StageGatePolicy};

use crate::config::AppConfig;
use crate::errors::{CoreError, DomainError};

/// Las seis colecciones de reconciliación más los ítems de flujo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotBundle {
    #[serde(flatten)]
    pub input: CrossRefInput,
    #[serde(default)]
    pub workflow_items: Vec<WorkflowItem>,
}

impl SnapshotBundle {
    pub fn new(input: CrossRefInput, workflow_items: Vec<WorkflowItem>) -> Self {
        Self { input, workflow_items }
    }

    /// Interpreta y valida un paquete JSON.
    ///
    /// # Errores
    /// `CoreError::Json` si el JSON no tiene la forma esperada,
    /// `CoreError::Domain` si algún ítem de flujo es incoherente.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let bundle: SnapshotBundle = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Comprueba identificadores únicos, etapas en su casillero y avances
    /// dentro de 0–100.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for item in &self.workflow_items {
            if item.id.trim().is_empty() {
                return Err(DomainError::InvalidBundle("ítem de flujo sin identificador".into()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(DomainError::InvalidBundle(format!("ítem de flujo duplicado: {}", item.id)));
            }
            for (expected, snap) in WorkflowStage::ALL.into_iter().zip(item.stages()) {
                if snap.stage != expected {
                    return Err(DomainError::InvalidBundle(format!("ítem {}: se esperaba etapa {expected} y llegó {}",
                                                                  item.id, snap.stage)));
                }
                if let Some(c) = snap.completion {
                    if !c.is_finite() || !(0.0..=100.0).contains(&c) {
                        return Err(DomainError::Validation(format!("ítem {}: avance de {expected} fuera de rango ({c})",
                                                                   item.id)));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Lee un paquete desde disco.
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<SnapshotBundle, CoreError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let bundle = SnapshotBundle::from_json_str(&raw)?;
    log::info!("paquete {} cargado: {} registros, {} ítems de flujo",
               path.display(),
               bundle.input.record_count(),
               bundle.workflow_items.len());
    Ok(bundle)
}

/// Vista completa para el tablero.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    /// Huella del resultado de reconciliación (no incluye id ni fecha).
    pub fingerprint: String,
    pub cross_ref: CrossRefResult,
    pub summaries: Vec<CellHealthSummary>,
    pub scores: Vec<StationHealthScore>,
    /// Cuellos de botella ordenados (y truncados según configuración).
    pub bottlenecks: Vec<WorkflowBottleneckStatus>,
    /// Estadísticas sobre todos los ítems clasificados.
    pub bottleneck_stats: BottleneckStats,
}

/// Ejecuta reconciliación, proyecciones de salud y clasificación.
pub fn build_report(bundle: &SnapshotBundle, config: &AppConfig) -> Result<DashboardReport, CoreError> {
    let cross_ref = build_cross_ref(&bundle.input);
    let fingerprint = result_fingerprint(&cross_ref)?;
    let summaries = summarize_cells(&cross_ref);
    let scores = score_stations(&cross_ref, &config.thresholds);

    let statuses = classify_all(&StageGatePolicy::default(), &bundle.workflow_items);
    let bottleneck_stats = bottleneck_stats(&statuses);
    let bottlenecks = rank_bottlenecks(&statuses, config.bottleneck_limit);

    log::info!("reporte listo: {} estaciones, {} flags, {} cuellos de botella",
               cross_ref.stats.total_stations,
               cross_ref.stats.total_flags,
               bottlenecks.len());

    Ok(DashboardReport { report_id: Uuid::new_v4(),
                         generated_at: Utc::now(),
                         engine_version: ENGINE_VERSION.to_string(),
                         fingerprint,
                         cross_ref,
                         summaries,
                         scores,
                         bottlenecks,
                         bottleneck_stats })
}
