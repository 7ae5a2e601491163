//! Vista canónica por estación y resultado de la reconciliación cruzada.
use serde::{Deserialize, Serialize};

use crate::flag::{Flag, FlagSeverity};
use crate::keys::StationKey;
use crate::records::{GunForceRecord, RiserRecord, RobotRecord, SimulationStatusRecord, ToolRecord, WeldGunRecord};

/// Registro canónico de una estación.
///
/// Invariantes (dentro de una pasada):
/// - existe exactamente un snapshot por `StationKey`;
/// - las listas de activos sólo crecen (append-only) y respetan el orden de
///   adjunción;
/// - `flags` permanece vacío hasta la fase de validación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub station_key: StationKey,
    /// Primera grafía cruda vista para esta estación.
    pub display_code: Option<String>,
    pub area: Option<String>,
    pub line: Option<String>,
    pub simulation_status: Option<SimulationStatusRecord>,
    pub tools: Vec<ToolRecord>,
    pub robots: Vec<RobotRecord>,
    pub weld_guns: Vec<WeldGunRecord>,
    pub gun_forces: Vec<GunForceRecord>,
    pub risers: Vec<RiserRecord>,
    pub flags: Vec<Flag>,
}

impl StationSnapshot {
    pub fn new(station_key: StationKey) -> Self {
        Self { station_key,
               display_code: None,
               area: None,
               line: None,
               simulation_status: None,
               tools: Vec::new(),
               robots: Vec::new(),
               weld_guns: Vec::new(),
               gun_forces: Vec::new(),
               risers: Vec::new(),
               flags: Vec::new() }
    }

    /// Completa código visible, área y línea: el primero que escribe gana y
    /// los siguientes sólo rellenan campos vacíos.
    pub fn fill_location(&mut self, display_code: &str, area: Option<&str>, line: Option<&str>) {
        if self.display_code.is_none() && !display_code.trim().is_empty() {
            self.display_code = Some(display_code.trim().to_string());
        }
        if self.area.is_none() {
            self.area = area.map(str::to_string);
        }
        if self.line.is_none() {
            self.line = line.map(str::to_string);
        }
    }

    pub fn has_simulation_status(&self) -> bool {
        self.simulation_status.is_some()
    }

    pub fn count_flags(&self, severity: FlagSeverity) -> usize {
        self.flags.iter().filter(|f| f.severity == severity).count()
    }

    pub fn asset_counts(&self) -> AssetCounts {
        AssetCounts { tools: self.tools.len(),
                      robots: self.robots.len(),
                      weld_guns: self.weld_guns.len(),
                      gun_forces: self.gun_forces.len(),
                      risers: self.risers.len() }
    }
}

/// Conteo de activos por tipo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCounts {
    pub tools: usize,
    pub robots: usize,
    pub weld_guns: usize,
    pub gun_forces: usize,
    pub risers: usize,
}

impl std::ops::AddAssign for AssetCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.tools += rhs.tools;
        self.robots += rhs.robots;
        self.weld_guns += rhs.weld_guns;
        self.gun_forces += rhs.gun_forces;
        self.risers += rhs.risers;
    }
}

/// Estadísticas agregadas de una pasada.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRefStats {
    pub total_stations: usize,
    pub stations_with_flags: usize,
    /// Flags de estación más flags globales.
    pub total_flags: usize,
    pub assets: AssetCounts,
}

/// Resultado de la reconciliación cruzada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRefResult {
    pub stations: Vec<StationSnapshot>,
    pub global_flags: Vec<Flag>,
    pub stats: CrossRefStats,
}

impl CrossRefResult {
    pub fn station(&self, key: &StationKey) -> Option<&StationSnapshot> {
        self.stations.iter().find(|s| &s.station_key == key)
    }

    /// Todos los flags (de estación y globales) en orden de emisión.
    pub fn all_flags(&self) -> impl Iterator<Item = &Flag> {
        self.stations.iter().flat_map(|s| s.flags.iter()).chain(self.global_flags.iter())
    }
}
