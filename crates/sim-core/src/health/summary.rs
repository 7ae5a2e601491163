//! Resumen de salud por celda (proyección de lectura de un `StationSnapshot`).
//!
//! Sólo mira campos de primera clase y la lista de flags; nunca el payload
//! crudo. El resumen es derivado y no se guarda de vuelta en el snapshot.
use serde::{Serialize, Serializer};
use std::fmt;

use sim_domain::{AssetCounts, CrossRefResult, FlagSeverity, StationKey, StationSnapshot};

use crate::constants::NOT_AVAILABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Ok,
    AtRisk,
    Critical,
}

/// Métrica proyectada: valor o "N/A" cuando la fuente no la trae.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Value(f64),
    NotAvailable,
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(MetricValue::NotAvailable, MetricValue::Value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Value(v) => write!(f, "{v:.1}"),
            MetricValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Value(v) => serializer.serialize_f64(*v),
            MetricValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellHealthSummary {
    pub station_key: StationKey,
    pub display_code: Option<String>,
    pub area: Option<String>,
    pub line: Option<String>,
    pub risk: RiskLevel,
    /// Mensajes de flags ERROR.
    pub critical_reasons: Vec<String>,
    /// Mensajes de flags WARNING.
    pub warning_reasons: Vec<String>,
    pub first_stage_completion: MetricValue,
    pub final_deliverables_completion: MetricValue,
    pub assets: AssetCounts,
}

/// Nivel de riesgo: cualquier ERROR fuerza `Critical` (corta la
/// evaluación); si no, cualquier WARNING da `AtRisk`.
pub fn risk_level(station: &StationSnapshot) -> RiskLevel {
    let mut risk = RiskLevel::Ok;
    for flag in &station.flags {
        match flag.severity {
            FlagSeverity::Error => return RiskLevel::Critical,
            FlagSeverity::Warning => risk = RiskLevel::AtRisk,
        }
    }
    risk
}

pub fn summarize_station(station: &StationSnapshot) -> CellHealthSummary {
    let reasons = |severity: FlagSeverity| -> Vec<String> {
        station.flags.iter().filter(|f| f.severity == severity).map(|f| f.message.clone()).collect()
    };
    let sim = station.simulation_status.as_ref();
    CellHealthSummary { station_key: station.station_key.clone(),
                        display_code: station.display_code.clone(),
                        area: station.area.clone(),
                        line: station.line.clone(),
                        risk: risk_level(station),
                        critical_reasons: reasons(FlagSeverity::Error),
                        warning_reasons: reasons(FlagSeverity::Warning),
                        first_stage_completion: sim.and_then(|s| s.first_stage_completion).into(),
                        final_deliverables_completion: sim.and_then(|s| s.final_deliverables_completion).into(),
                        assets: station.asset_counts() }
}

/// Un resumen por estación, en el orden del resultado.
pub fn summarize_cells(result: &CrossRefResult) -> Vec<CellHealthSummary> {
    result.stations.iter().map(summarize_station).collect()
}
