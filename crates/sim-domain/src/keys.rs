//! Claves canónicas de estación y de pistola de soldadura.
//!
//! Todas las fuentes (simulación, tooling, robots, pistolas, fuerzas, risers)
//! escriben los identificadores a su manera: `"STATION 010"`, `"St. 010"`,
//! `"OP-10"`, `"010"`. El normalizador los colapsa a una única clave para que
//! la reconciliación cruzada no fragmente una estación real en varias.
//!
//! Las claves sólo se construyen a través de `normalize`; un identificador
//! sin contenido útil devuelve `None`.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Prefijos sin valor semántico, ordenados del más largo al más corto para
/// que `STATION` no se consuma como `ST`.
const STATION_PREFIXES: &[&str] = &["STATION", "STN", "ST", "OP"];

/// Separadores que pueden seguir a un prefijo o rodear la parte numérica.
const SEPARATORS: &[char] = &['.', '-', '_', ':', '#', '/'];

/// Al deserializar también pasa por `normalize`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct StationKey(String);

impl TryFrom<String> for StationKey {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        StationKey::normalize(&raw).ok_or_else(|| DomainError::ValidationError(format!("Clave de estación vacía: '{raw}'")))
    }
}

impl StationKey {
    /// Normaliza un identificador de estación.
    ///
    /// Pasos: trim + mayúsculas, se elimina un prefijo conocido (sólo si va
    /// seguido de separador, espacio o dígito), se descartan separadores
    /// iniciales y todo espacio interno, y si el resultado es puramente
    /// numérico se quitan los ceros a la izquierda.
    pub fn normalize(raw: &str) -> Option<StationKey> {
        let upper = raw.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        let rest = strip_station_prefix(&upper);
        let compact: String = rest.trim_start_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
                                  .chars()
                                  .filter(|c| !c.is_whitespace())
                                  .collect();
        if compact.is_empty() {
            return None;
        }
        if compact.chars().all(|c| c.is_ascii_digit()) {
            let trimmed = compact.trim_start_matches('0');
            let canonical = if trimmed.is_empty() { "0" } else { trimmed };
            return Some(StationKey(canonical.to_string()));
        }
        Some(StationKey(compact))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_station_prefix(upper: &str) -> &str {
    for prefix in STATION_PREFIXES {
        if let Some(rest) = upper.strip_prefix(prefix) {
            match rest.chars().next() {
                Some(c) if c.is_whitespace() || c.is_ascii_digit() || SEPARATORS.contains(&c) => return rest,
                // etiqueta sola ("STATION"): no queda identificador
                None => return rest,
                Some(_) => {}
            }
        }
    }
    upper
}

/// Clave canónica de pistola de soldadura (enlaza pistolas con registros de
/// fuerza).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct GunKey(String);

impl TryFrom<String> for GunKey {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        GunKey::normalize(&raw).ok_or_else(|| DomainError::ValidationError(format!("Clave de pistola vacía: '{raw}'")))
    }
}

impl GunKey {
    /// Mayúsculas y sin espacios; vacío => `None`.
    pub fn normalize(raw: &str) -> Option<GunKey> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_uppercase();
        if compact.is_empty() {
            None
        } else {
            Some(GunKey(compact))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
