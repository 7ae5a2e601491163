//! sim-core: reconciliación cruzada determinista y proyecciones de salud.
pub mod constants;
pub mod crossref;
pub mod errors;
pub mod hashing;
pub mod health;

pub use crossref::build_cross_ref;
pub use errors::CoreError;
pub use health::{score_station, score_stations, summarize_cells, summarize_station, CellHealthSummary, HealthThresholds,
                 RiskLevel, StationHealthScore, TrafficLight};

/// Huella estable de un resultado de reconciliación (incluye la versión de
/// reglas). Dos pasadas sobre la misma entrada producen la misma huella.
pub fn result_fingerprint(result: &sim_domain::CrossRefResult) -> Result<String, CoreError> {
    hashing::fingerprint(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_domain::{CrossRefInput, SimulationStatusRecord, ToolRecord};

    #[test]
    fn fingerprint_is_stable_across_builds_and_sensitive_to_content() {
        let mut input = CrossRefInput { simulation_status: vec![SimulationStatusRecord::new("010")],
                                        tools: vec![ToolRecord::new("T1", "010")],
                                        ..Default::default() };
        let a = result_fingerprint(&build_cross_ref(&input)).unwrap();
        let b = result_fingerprint(&build_cross_ref(&input)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        input.tools[0].sim_leader = Some("Marta".into());
        let c = result_fingerprint(&build_cross_ref(&input)).unwrap();
        assert_ne!(a, c);
    }
}
