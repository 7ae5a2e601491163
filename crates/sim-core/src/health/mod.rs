//! Proyecciones de salud por estación: resumen de riesgo y puntuación.
pub mod score;
pub mod summary;

pub use score::{completion_metrics, score_station, score_stations, traffic_light, HealthThresholds, StationHealthScore,
                TrafficLight};
pub use summary::{risk_level, summarize_cells, summarize_station, CellHealthSummary, MetricValue, RiskLevel};
