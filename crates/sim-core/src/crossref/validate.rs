//! Reglas de validación por estación.
//!
//! Cada regla se evalúa de forma independiente y los resultados se suman;
//! no hay estado compartido entre estaciones.
use sim_domain::{Flag, StationSnapshot};

pub fn validate_station(station: &StationSnapshot) -> Vec<Flag> {
    let key = &station.station_key;
    let mut flags = Vec::new();
    if station.simulation_status.is_none() {
        flags.push(Flag::station_missing_from_simulation(key));
    }
    for robot in station.robots.iter().filter(|r| !r.has_config_info) {
        flags.push(Flag::robot_missing_configuration(key, &robot.robot_id));
    }
    for tool in station.tools.iter().filter(|t| !t.has_owner()) {
        flags.push(Flag::tool_without_owner(key, &tool.tool_id));
    }
    flags
}
