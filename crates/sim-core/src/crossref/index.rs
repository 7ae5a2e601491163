//! Fase de siembra: índice de estaciones e índice de fuerzas por pistola.
//!
//! Ambos índices son valores locales de una pasada: se construyen dentro de
//! `build_cross_ref` y se descartan al retornar.
use indexmap::IndexMap;
use std::collections::HashSet;

use sim_domain::{CrossRefInput, Flag, GunForceRecord, GunKey, SourceRecord, StationKey, StationSnapshot, WeldGunRecord};

/// Un `StationSnapshot` por clave canónica, en orden de primera aparición.
#[derive(Debug, Default)]
pub struct StationIndex {
    stations: IndexMap<StationKey, StationSnapshot>,
    skipped: usize,
}

impl StationIndex {
    /// Siembra en el orden fijo: simulación, tooling, robots, pistolas,
    /// risers. Los registros de fuerza no siembran (usan clave de pistola).
    pub fn seed(input: &CrossRefInput) -> Self {
        let mut index = Self::default();
        index.seed_records(&input.simulation_status);
        index.seed_records(&input.tools);
        index.seed_records(&input.robots);
        index.seed_records(&input.weld_guns);
        index.seed_records(&input.risers);
        index
    }

    fn seed_records<R: SourceRecord>(&mut self, records: &[R]) {
        for record in records {
            let Some(key) = record.station_key() else {
                self.skipped += 1;
                continue;
            };
            self.stations
                .entry(key.clone())
                .or_insert_with(|| StationSnapshot::new(key))
                .fill_location(record.station_ref(), record.area_code(), record.line_code());
        }
    }

    pub fn get_mut(&mut self, key: &StationKey) -> Option<&mut StationSnapshot> {
        self.stations.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Registros descartados por clave de estación irresoluble.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_stations(self) -> impl Iterator<Item = StationSnapshot> {
        self.stations.into_values()
    }
}

/// Registros de fuerza agrupados por clave de pistola normalizada.
#[derive(Debug, Default)]
pub struct GunForceIndex<'a> {
    by_key: IndexMap<GunKey, Vec<&'a GunForceRecord>>,
    claimed: HashSet<GunKey>,
}

impl<'a> GunForceIndex<'a> {
    pub fn build(records: &'a [GunForceRecord]) -> Self {
        let mut by_key: IndexMap<GunKey, Vec<&'a GunForceRecord>> = IndexMap::new();
        for record in records {
            if let Some(key) = record.normalized_gun_key() {
                by_key.entry(key).or_default().push(record);
            }
        }
        Self { by_key, claimed: HashSet::new() }
    }

    /// Devuelve (copias de) todos los registros con esa clave y marca la
    /// clave como reclamada por una pistola.
    pub fn claim(&mut self, key: &GunKey) -> Vec<GunForceRecord> {
        self.claimed.insert(key.clone());
        self.by_key.get(key).map(|records| records.iter().map(|r| (*r).clone()).collect()).unwrap_or_default()
    }

    /// Marca como reclamadas las claves de todas las pistolas de entrada,
    /// también las que se descartaron por estación irresoluble.
    pub fn mark_weld_guns(&mut self, weld_guns: &[WeldGunRecord]) {
        self.claimed.extend(weld_guns.iter().filter_map(WeldGunRecord::normalized_gun_key));
    }

    /// Un flag global por clave de fuerza que ninguna pistola reclamó.
    pub fn unclaimed_flags(&self) -> Vec<Flag> {
        self.by_key
            .iter()
            .filter(|(key, _)| !self.claimed.contains(*key))
            .map(|(key, records)| Flag::gun_force_without_weld_gun(key, records.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_domain::{RiserRecord, SimulationStatusRecord, ToolRecord};

    #[test]
    fn seed_unions_sources_in_first_seen_order() {
        let input = CrossRefInput { simulation_status: vec![SimulationStatusRecord::new("STATION 020")],
                                    tools: vec![ToolRecord::new("T1", "010"), ToolRecord::new("T2", "St. 020")],
                                    risers: vec![RiserRecord::new("R1", "OP-30"), RiserRecord::new("R2", "")],
                                    ..Default::default() };
        let index = StationIndex::seed(&input);
        let keys: Vec<String> = index.into_stations().map(|s| s.station_key.to_string()).collect();
        assert_eq!(keys, vec!["20", "10", "30"]);
    }

    #[test]
    fn unusable_keys_are_counted_as_skipped() {
        let input = CrossRefInput { tools: vec![ToolRecord::new("T1", "  "), ToolRecord::new("T2", "STATION")],
                                    ..Default::default() };
        let index = StationIndex::seed(&input);
        assert!(index.is_empty());
        assert_eq!(index.skipped(), 2);
    }

    #[test]
    fn gun_index_reports_unclaimed_keys_once() {
        let forces = vec![GunForceRecord::new("G1"), GunForceRecord::new("g1"), GunForceRecord::new("G2")];
        let mut index = GunForceIndex::build(&forces);
        assert_eq!(index.claim(&GunKey::normalize("G2").unwrap()).len(), 1);
        let flags = index.unclaimed_flags();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].gun_key.as_ref().map(|g| g.as_str()), Some("G1"));
        assert!(flags[0].station_key.is_none());
    }
}
