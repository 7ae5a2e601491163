//! Constantes del motor de reconciliación.
//!
//! `ENGINE_VERSION` forma parte del fingerprint de resultados: cambiarla
//! invalida huellas previas aunque la entrada sea idéntica. Mantener estable
//! mientras las reglas de reconciliación y puntuación no cambien.

/// Versión lógica de las reglas (normalizador, validador, puntuación).
pub const ENGINE_VERSION: &str = "XR1.0";

/// Penalización por flag ERROR en la puntuación de salud de estación.
pub const DEFAULT_ERROR_PENALTY: f64 = 15.0;

/// Penalización por flag WARNING.
pub const DEFAULT_WARNING_PENALTY: f64 = 5.0;

/// Desde este puntaje el semáforo deja de ser rojo.
pub const DEFAULT_AMBER_FROM: f64 = 50.0;

/// Desde este puntaje el semáforo es verde.
pub const DEFAULT_GREEN_FROM: f64 = 80.0;

/// Texto que sustituye a métricas ausentes en las proyecciones.
pub const NOT_AVAILABLE: &str = "N/A";
