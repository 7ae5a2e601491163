//! Bolsa de columnas crudas de la hoja de cálculo.
//!
//! Las columnas que no se promueven a campos de primera clase viajan aquí,
//! en un mapa ordenado y explícito. `raw_keys` documenta las claves que los
//! consumidores suelen consultar; cualquier otra columna se tolera sin más.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claves consultadas habitualmente en `RawPayload`.
pub mod raw_keys {
    /// Hoja de origen dentro del libro exportado.
    pub const SOURCE_SHEET: &str = "source_sheet";
    /// Fila de origen (1-based) dentro de la hoja.
    pub const SOURCE_ROW: &str = "source_row";
    /// Comentario libre del ingeniero.
    pub const COMMENT: &str = "comment";
    /// Proveedor/fabricante del activo.
    pub const SUPPLIER: &str = "supplier";
    /// Revisión del diseño declarada en la hoja.
    pub const REVISION: &str = "revision";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(BTreeMap<String, serde_json::Value>);

impl RawPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve una copia con la columna añadida (builder).
    pub fn with(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Texto no vacío (tras trim).
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str()).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Número; acepta también texto numérico ("42.5").
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Booleano; acepta "yes"/"no", "true"/"false", "1"/"0".
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::String(s) => match s.trim().to_lowercase().as_str() {
                "yes" | "y" | "true" | "1" | "x" => Some(true),
                "no" | "n" | "false" | "0" => Some(false),
                _ => None,
            },
            serde_json::Value::Number(n) => n.as_i64().map(|v| v != 0),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
