use thiserror::Error;

use super::domain_error::DomainError;

/// Errores de frontera de la aplicación (entrada, configuración, motor).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error del motor de reconciliación: {0}")]
    Engine(#[from] sim_core::CoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
