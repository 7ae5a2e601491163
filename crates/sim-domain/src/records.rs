//! Registros de origen tal como los entrega la capa de ingesta.
//!
//! Son entradas inmutables: el motor de reconciliación nunca los modifica,
//! sólo los indexa y los adjunta (por copia) a la estación correspondiente.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::keys::{GunKey, StationKey};
use crate::payload::RawPayload;

/// Contrato común de los registros que referencian una estación.
///
/// Permite escribir las pasadas de siembra y adjunción una sola vez para
/// las cinco colecciones con clave de estación.
pub trait SourceRecord {
    /// Identificador de estación tal cual aparece en la fuente.
    fn station_ref(&self) -> &str;

    fn area_code(&self) -> Option<&str> {
        None
    }

    fn line_code(&self) -> Option<&str> {
        None
    }

    fn station_key(&self) -> Option<StationKey> {
        StationKey::normalize(self.station_ref())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

macro_rules! impl_source_record {
    ($ty:ty) => {
        impl SourceRecord for $ty {
            fn station_ref(&self) -> &str {
                &self.station
            }
            fn area_code(&self) -> Option<&str> {
                non_blank(&self.area)
            }
            fn line_code(&self) -> Option<&str> {
                non_blank(&self.line)
            }
        }
    };
}

/// Fila del seguimiento de simulación de una estación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationStatusRecord {
    pub station: String,
    pub area: Option<String>,
    pub line: Option<String>,
    pub engineer: Option<String>,
    /// Avance de la primera etapa (0–100). Métrica independiente de
    /// `final_deliverables_completion`; ninguna se deriva de la otra.
    pub first_stage_completion: Option<f64>,
    /// Avance de entregables finales (0–100).
    pub final_deliverables_completion: Option<f64>,
    /// Métricas nominales por etapa de simulación (p. ej. "reach", "cycle_time").
    pub stage_metrics: BTreeMap<String, f64>,
    pub raw: RawPayload,
}

impl SimulationStatusRecord {
    pub fn new(station: impl Into<String>) -> Self {
        Self { station: station.into(), ..Default::default() }
    }
}

/// Herramental (fixture, gripper, etc.) asignado a una estación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolRecord {
    pub tool_id: String,
    pub station: String,
    pub area: Option<String>,
    pub line: Option<String>,
    pub description: Option<String>,
    pub sim_leader: Option<String>,
    pub team_leader: Option<String>,
    pub raw: RawPayload,
}

impl ToolRecord {
    pub fn new(tool_id: impl Into<String>, station: impl Into<String>) -> Self {
        Self { tool_id: tool_id.into(), station: station.into(), ..Default::default() }
    }

    /// Tiene responsable si hay líder de simulación o líder de equipo no vacío.
    pub fn has_owner(&self) -> bool {
        non_blank(&self.sim_leader).is_some() || non_blank(&self.team_leader).is_some()
    }
}

/// Especificación de un robot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotRecord {
    pub robot_id: String,
    pub station: String,
    pub area: Option<String>,
    pub line: Option<String>,
    pub model: Option<String>,
    pub has_config_info: bool,
    pub raw: RawPayload,
}

impl RobotRecord {
    pub fn new(robot_id: impl Into<String>, station: impl Into<String>) -> Self {
        Self { robot_id: robot_id.into(), station: station.into(), ..Default::default() }
    }
}

/// Pistola de soldadura montada en una estación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldGunRecord {
    pub gun_key: String,
    pub station: String,
    pub area: Option<String>,
    pub line: Option<String>,
    pub robot_id: Option<String>,
    pub raw: RawPayload,
}

impl WeldGunRecord {
    pub fn new(gun_key: impl Into<String>, station: impl Into<String>) -> Self {
        Self { gun_key: gun_key.into(), station: station.into(), ..Default::default() }
    }

    pub fn normalized_gun_key(&self) -> Option<GunKey> {
        GunKey::normalize(&self.gun_key)
    }
}

/// Dato de fuerza de una pistola. Se enlaza por clave de pistola, no por
/// estación; `station` es sólo una pista informativa de la hoja de fuerzas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunForceRecord {
    pub gun_key: String,
    pub station: Option<String>,
    pub required_force_kn: Option<f64>,
    pub raw: RawPayload,
}

impl GunForceRecord {
    pub fn new(gun_key: impl Into<String>) -> Self {
        Self { gun_key: gun_key.into(), ..Default::default() }
    }

    pub fn normalized_gun_key(&self) -> Option<GunKey> {
        GunKey::normalize(&self.gun_key)
    }
}

/// Riser (pedestal) de una estación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiserRecord {
    pub riser_id: String,
    pub station: String,
    pub area: Option<String>,
    pub line: Option<String>,
    pub riser_type: Option<String>,
    pub height_mm: Option<f64>,
    pub raw: RawPayload,
}

impl RiserRecord {
    pub fn new(riser_id: impl Into<String>, station: impl Into<String>) -> Self {
        Self { riser_id: riser_id.into(), station: station.into(), ..Default::default() }
    }
}

impl_source_record!(SimulationStatusRecord);
impl_source_record!(ToolRecord);
impl_source_record!(RobotRecord);
impl_source_record!(WeldGunRecord);
impl_source_record!(RiserRecord);

/// Las seis colecciones de entrada de una pasada de reconciliación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossRefInput {
    pub simulation_status: Vec<SimulationStatusRecord>,
    pub tools: Vec<ToolRecord>,
    pub robots: Vec<RobotRecord>,
    pub weld_guns: Vec<WeldGunRecord>,
    pub gun_forces: Vec<GunForceRecord>,
    pub risers: Vec<RiserRecord>,
}

impl CrossRefInput {
    /// Número total de registros en las seis colecciones.
    pub fn record_count(&self) -> usize {
        self.simulation_status.len()
        + self.tools.len()
        + self.robots.len()
        + self.weld_guns.len()
        + self.gun_forces.len()
        + self.risers.len()
    }
}
