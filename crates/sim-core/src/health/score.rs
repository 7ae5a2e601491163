//! Puntuación 0–100 y semáforo por estación.
//!
//! base = promedio de métricas 0–100 del registro de simulación (métricas
//! por etapa si hay alguna válida; si no, los dos avances de primer nivel;
//! si tampoco, 0). puntaje = clamp(round(base − penalización), 0, 100).
use serde::{Deserialize, Serialize};

use sim_domain::{CrossRefResult, FlagSeverity, SimulationStatusRecord, StationKey, StationSnapshot};

use crate::constants::{DEFAULT_AMBER_FROM, DEFAULT_ERROR_PENALTY, DEFAULT_GREEN_FROM, DEFAULT_WARNING_PENALTY};

/// Penalizaciones y umbrales del semáforo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub error_penalty: f64,
    pub warning_penalty: f64,
    pub amber_from: f64,
    pub green_from: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self { error_penalty: DEFAULT_ERROR_PENALTY,
               warning_penalty: DEFAULT_WARNING_PENALTY,
               amber_from: DEFAULT_AMBER_FROM,
               green_from: DEFAULT_GREEN_FROM }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficLight {
    Red,
    Amber,
    Green,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationHealthScore {
    pub station_key: StationKey,
    pub score: u8,
    pub light: TrafficLight,
    /// Avance base antes de penalizar (`None` sin registro de simulación).
    pub base_completion: Option<f64>,
    pub penalty: f64,
}

fn in_range(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// Métricas válidas (finitas, 0–100) del registro de simulación.
pub fn completion_metrics(sim: &SimulationStatusRecord) -> Vec<f64> {
    let stage: Vec<f64> = sim.stage_metrics.values().copied().filter(|v| in_range(*v)).collect();
    if !stage.is_empty() {
        return stage;
    }
    [sim.first_stage_completion, sim.final_deliverables_completion].into_iter()
                                                                   .flatten()
                                                                   .filter(|v| in_range(*v))
                                                                   .collect()
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn traffic_light(score: u8, thresholds: &HealthThresholds) -> TrafficLight {
    let score = f64::from(score);
    if score < thresholds.amber_from {
        TrafficLight::Red
    } else if score < thresholds.green_from {
        TrafficLight::Amber
    } else {
        TrafficLight::Green
    }
}

pub fn score_station(station: &StationSnapshot, thresholds: &HealthThresholds) -> StationHealthScore {
    let penalty = station.count_flags(FlagSeverity::Error) as f64 * thresholds.error_penalty
                  + station.count_flags(FlagSeverity::Warning) as f64 * thresholds.warning_penalty;
    let base_completion = station.simulation_status.as_ref().map(|sim| average(&completion_metrics(sim)));
    let raw = base_completion.unwrap_or(0.0) - penalty;
    let score = raw.round().clamp(0.0, 100.0) as u8;
    StationHealthScore { station_key: station.station_key.clone(),
                         score,
                         light: traffic_light(score, thresholds),
                         base_completion,
                         penalty }
}

pub fn score_stations(result: &CrossRefResult, thresholds: &HealthThresholds) -> Vec<StationHealthScore> {
    result.stations.iter().map(|s| score_station(s, thresholds)).collect()
}
