//! Motor de referencias cruzadas.
//!
//! Une las seis colecciones de origen en un `StationSnapshot` por estación
//! canónica:
//! 1. siembra (`index`): get-or-create por clave normalizada;
//! 2. adjunción (`attach`): agrega registros y enlaza pistolas con fuerzas;
//! 3. validación (`validate`): flags por estación;
//! 4. estadísticas (`stats`).
//!
//! Es una función pura: misma entrada => mismo resultado, mismo orden.
pub mod attach;
pub mod index;
pub mod stats;
pub mod validate;

use log::debug;
use sim_domain::{CrossRefInput, CrossRefResult, StationSnapshot};

pub use attach::LinkFlags;
pub use index::{GunForceIndex, StationIndex};
pub use stats::compute_stats;
pub use validate::validate_station;

/// Ejecuta una pasada completa de reconciliación.
pub fn build_cross_ref(input: &CrossRefInput) -> CrossRefResult {
    let mut index = StationIndex::seed(input);
    let mut guns = GunForceIndex::build(&input.gun_forces);
    let mut links = LinkFlags::default();
    attach::attach_all(&mut index, &mut guns, input, &mut links);

    guns.mark_weld_guns(&input.weld_guns);
    let global_flags = guns.unclaimed_flags();
    let skipped = index.skipped();
    let stations: Vec<StationSnapshot> = index.into_stations()
                                              .map(|mut station| {
                                                  let mut flags = links.take(&station.station_key);
                                                  flags.extend(validate_station(&station));
                                                  station.flags = flags;
                                                  station
                                              })
                                              .collect();
    let stats = compute_stats(&stations, &global_flags);
    debug!("cross-ref: {} registros, {} estaciones, {} flags, {} registros sin clave",
           input.record_count(),
           stats.total_stations,
           stats.total_flags,
           skipped);
    CrossRefResult { stations, global_flags, stats }
}
