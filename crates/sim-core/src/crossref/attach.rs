//! Fase de adjunción: cada registro se agrega a la lista correspondiente de
//! su estación; las pistolas además se enlazan con sus datos de fuerza.
use log::{debug, warn};
use std::collections::HashMap;

use sim_domain::{CrossRefInput, Flag, SourceRecord, StationKey, StationSnapshot};

use super::index::{GunForceIndex, StationIndex};

/// Flags de enlace detectados durante la adjunción.
///
/// Se guardan aparte y se vuelcan en la estación durante la validación, de
/// modo que `StationSnapshot::flags` sigue vacío hasta esa fase.
#[derive(Debug, Default)]
pub struct LinkFlags(HashMap<StationKey, Vec<Flag>>);

impl LinkFlags {
    pub fn push(&mut self, station: &StationKey, flag: Flag) {
        self.0.entry(station.clone()).or_default().push(flag);
    }

    pub fn take(&mut self, station: &StationKey) -> Vec<Flag> {
        self.0.remove(station).unwrap_or_default()
    }
}

fn attach_records<R, F>(index: &mut StationIndex, records: &[R], mut attach: F)
    where R: SourceRecord,
          F: FnMut(&mut StationSnapshot, &R)
{
    for record in records {
        let Some(key) = record.station_key() else {
            continue;
        };
        if let Some(station) = index.get_mut(&key) {
            attach(station, record);
        }
    }
}

pub fn attach_all(index: &mut StationIndex, guns: &mut GunForceIndex<'_>, input: &CrossRefInput, links: &mut LinkFlags) {
    attach_records(index, &input.simulation_status, |station, record| {
        if station.simulation_status.is_none() {
            station.simulation_status = Some(record.clone());
        } else {
            warn!("estación {} duplicada en estado de simulación ('{}')", station.station_key, record.station);
            links.push(&station.station_key, Flag::duplicate_station_definition(&station.station_key, &record.station));
        }
    });
    attach_records(index, &input.tools, |station, record| station.tools.push(record.clone()));
    attach_records(index, &input.robots, |station, record| station.robots.push(record.clone()));
    attach_records(index, &input.weld_guns, |station, record| {
        station.weld_guns.push(record.clone());
        let Some(gun) = record.normalized_gun_key() else {
            debug!("pistola sin clave en estación {}: sin búsqueda de fuerza", station.station_key);
            return;
        };
        let matches = guns.claim(&gun);
        match matches.len() {
            0 => links.push(&station.station_key, Flag::missing_gun_force(&station.station_key, &gun)),
            1 => station.gun_forces.extend(matches),
            n => {
                station.gun_forces.extend(matches);
                links.push(&station.station_key, Flag::ambiguous_gun_match(&station.station_key, &gun, n));
            }
        }
    });
    attach_records(index, &input.risers, |station, record| station.risers.push(record.clone()));
}
