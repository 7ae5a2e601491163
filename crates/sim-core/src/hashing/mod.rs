//! Módulo de hashing y canonicalización JSON.
//!
//! `fingerprint` produce una huella estable del contenido de cualquier
//! resultado serializable, incluyendo `ENGINE_VERSION` para que un cambio
//! de reglas invalide huellas anteriores aunque la entrada no cambie.

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{hash_str, hash_value};

use serde::Serialize;

use crate::constants::ENGINE_VERSION;
use crate::errors::CoreError;

/// Insumos del fingerprint antes de canonicalizar.
#[derive(Serialize)]
struct FingerprintInput<'a, T: Serialize> {
    engine_version: &'a str,
    content: &'a T,
}

/// Huella blake3 (hex, 64 caracteres) del contenido.
pub fn fingerprint<T: Serialize>(content: &T) -> Result<String, CoreError> {
    let input = FingerprintInput { engine_version: ENGINE_VERSION, content };
    let value = serde_json::to_value(&input)?;
    Ok(hash_value(&value))
}
