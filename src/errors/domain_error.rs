use thiserror::Error;

/// Errores de dominio detectados en la frontera (forma del paquete de entrada).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Paquete de entrada inválido: {0}")]
    InvalidBundle(String),
}

impl From<sim_domain::DomainError> for DomainError {
    fn from(err: sim_domain::DomainError) -> Self {
        match err {
            sim_domain::DomainError::ValidationError(msg) => DomainError::Validation(msg),
            sim_domain::DomainError::SerializationError(msg) => DomainError::InvalidBundle(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::Validation("inválido".into());
        assert_eq!(err.to_string(), "Validación fallida: inválido");
    }

    #[test]
    fn test_from_sim_domain_error() {
        let err: DomainError = sim_domain::DomainError::ValidationError("avance".into()).into();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "avance"));
    }
}
