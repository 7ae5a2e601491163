//! Hallazgos de calidad de datos (`Flag`).
//!
//! Conjunto cerrado de tipos con severidad fija. Los flags se producen una
//! sola vez por pasada de reconciliación y nunca se editan después.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::keys::{GunKey, StationKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagKind {
    /// Pistola de soldadura sin ningún registro de fuerza.
    MissingGunForceForWeldGun,
    /// Más de un registro de fuerza comparte la clave de la pistola.
    AmbiguousGunMatch,
    /// Estación conocida sólo por listas de activos.
    StationMissingFromSimulationStatus,
    RobotMissingConfiguration,
    ToolWithoutOwner,
    /// Varias filas de simulación para la misma estación canónica.
    DuplicateStationDefinition,
    /// Registro de fuerza que ninguna pistola reclama (flag global).
    GunForceWithoutWeldGun,
}

impl FlagKind {
    /// Severidad asociada a cada tipo.
    pub fn severity(self) -> FlagSeverity {
        match self {
            FlagKind::DuplicateStationDefinition => FlagSeverity::Error,
            _ => FlagSeverity::Warning,
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlagKind::MissingGunForceForWeldGun => "MISSING_GUN_FORCE_FOR_WELD_GUN",
            FlagKind::AmbiguousGunMatch => "AMBIGUOUS_GUN_MATCH",
            FlagKind::StationMissingFromSimulationStatus => "STATION_MISSING_FROM_SIMULATION_STATUS",
            FlagKind::RobotMissingConfiguration => "ROBOT_MISSING_CONFIGURATION",
            FlagKind::ToolWithoutOwner => "TOOL_WITHOUT_OWNER",
            FlagKind::DuplicateStationDefinition => "DUPLICATE_STATION_DEFINITION",
            FlagKind::GunForceWithoutWeldGun => "GUN_FORCE_WITHOUT_WELD_GUN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub kind: FlagKind,
    pub severity: FlagSeverity,
    pub station_key: Option<StationKey>,
    pub robot_key: Option<String>,
    pub gun_key: Option<GunKey>,
    pub tool_id: Option<String>,
    pub message: String,
}

impl Flag {
    fn base(kind: FlagKind, station_key: Option<&StationKey>, message: String) -> Self {
        Flag { kind,
               severity: kind.severity(),
               station_key: station_key.cloned(),
               robot_key: None,
               gun_key: None,
               tool_id: None,
               message }
    }

    pub fn missing_gun_force(station: &StationKey, gun: &GunKey) -> Self {
        let mut flag = Self::base(FlagKind::MissingGunForceForWeldGun,
                                  Some(station),
                                  format!("Pistola {gun} en estación {station} sin datos de fuerza"));
        flag.gun_key = Some(gun.clone());
        flag
    }

    pub fn ambiguous_gun_match(station: &StationKey, gun: &GunKey, matches: usize) -> Self {
        let mut flag = Self::base(FlagKind::AmbiguousGunMatch,
                                  Some(station),
                                  format!("Pistola {gun} en estación {station} coincide con {matches} registros de fuerza"));
        flag.gun_key = Some(gun.clone());
        flag
    }

    pub fn station_missing_from_simulation(station: &StationKey) -> Self {
        Self::base(FlagKind::StationMissingFromSimulationStatus,
                   Some(station),
                   format!("Estación {station} ausente del estado de simulación"))
    }

    pub fn robot_missing_configuration(station: &StationKey, robot_id: &str) -> Self {
        let mut flag = Self::base(FlagKind::RobotMissingConfiguration,
                                  Some(station),
                                  format!("Robot {robot_id} en estación {station} sin información de configuración"));
        flag.robot_key = Some(robot_id.to_string());
        flag
    }

    pub fn tool_without_owner(station: &StationKey, tool_id: &str) -> Self {
        let mut flag = Self::base(FlagKind::ToolWithoutOwner,
                                  Some(station),
                                  format!("Herramienta {tool_id} en estación {station} sin líder de simulación ni de equipo"));
        flag.tool_id = Some(tool_id.to_string());
        flag
    }

    pub fn duplicate_station_definition(station: &StationKey, raw_spelling: &str) -> Self {
        Self::base(FlagKind::DuplicateStationDefinition,
                   Some(station),
                   format!("Estación {station} definida más de una vez en el estado de simulación (fila '{raw_spelling}' ignorada)"))
    }

    pub fn gun_force_without_weld_gun(gun: &GunKey, records: usize) -> Self {
        let mut flag = Self::base(FlagKind::GunForceWithoutWeldGun,
                                  None,
                                  format!("{records} registro(s) de fuerza para la pistola {gun} sin pistola asociada"));
        flag.gun_key = Some(gun.clone());
        flag
    }

    pub fn is_error(&self) -> bool {
        self.severity == FlagSeverity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == FlagSeverity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_severity_and_subject_keys() {
        let station = StationKey::normalize("020").unwrap();
        let gun = GunKey::normalize("G_MISSING").unwrap();
        let flag = Flag::missing_gun_force(&station, &gun);
        assert_eq!(flag.kind, FlagKind::MissingGunForceForWeldGun);
        assert!(flag.is_warning());
        assert_eq!(flag.gun_key.as_ref().map(|g| g.as_str()), Some("G_MISSING"));
        assert!(flag.message.contains("G_MISSING"));

        let dup = Flag::duplicate_station_definition(&station, "STATION 020");
        assert!(dup.is_error());
    }

    #[test]
    fn kind_serializes_screaming_snake_case() {
        let v = serde_json::to_value(FlagKind::MissingGunForceForWeldGun).unwrap();
        assert_eq!(v, serde_json::json!("MISSING_GUN_FORCE_FOR_WELD_GUN"));
        assert_eq!(FlagKind::AmbiguousGunMatch.to_string(), "AMBIGUOUS_GUN_MATCH");
    }
}
