//! Errores específicos del core.
//!
//! La reconciliación y las puntuaciones nunca fallan; sólo la serialización
//! auxiliar (fingerprint) puede devolver error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
