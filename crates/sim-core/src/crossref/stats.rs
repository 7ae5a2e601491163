//! Agregación de estadísticas sobre la lista final de estaciones.
use sim_domain::{AssetCounts, CrossRefStats, Flag, StationSnapshot};

/// Pasada única, sin efectos laterales.
pub fn compute_stats(stations: &[StationSnapshot], global_flags: &[Flag]) -> CrossRefStats {
    let mut stats = CrossRefStats { total_stations: stations.len(),
                                    total_flags: global_flags.len(),
                                    assets: AssetCounts::default(),
                                    ..Default::default() };
    for station in stations {
        if !station.flags.is_empty() {
            stats.stations_with_flags += 1;
        }
        stats.total_flags += station.flags.len();
        stats.assets += station.asset_counts();
    }
    stats
}
